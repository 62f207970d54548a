use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::curriculum::CourseDag;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

pub(super) fn search_courses(dag: &CourseDag, query: &str, limit: usize) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut ranked = dag
        .nodes()
        .filter_map(|node| {
            let code_score = fuzzy_match_score(&matcher, &node.code, query);
            let name_score = fuzzy_match_score(&matcher, &node.name, query);
            code_score
                .max(name_score)
                .map(|score| (score, node.code.as_str()))
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, code)| code.to_owned())
        .collect()
}

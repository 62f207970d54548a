use std::collections::{BTreeMap, HashMap};

use eframe::egui::{Vec2, vec2};

use crate::curriculum::CourseDag;

// `y` grows upward; every column is centred on `y = 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct LayeredLayout {
    pub positions: HashMap<String, Vec2>,
    pub columns: Vec<u32>,
    pub y_min: f32,
    pub y_max: f32,
}

impl LayeredLayout {
    pub fn column_x(&self, semester: u32, horizontal_spacing: f32) -> f32 {
        semester as f32 * horizontal_spacing
    }
}

pub fn layered_layout(
    dag: &CourseDag,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    margin: f32,
) -> LayeredLayout {
    let mut nodes_by_semester: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
    let any_semester = dag.nodes().any(|node| node.semester != 0);
    for node in dag.nodes() {
        let key = if any_semester { node.semester } else { 1 };
        nodes_by_semester.entry(key).or_default().push(node.code.as_str());
    }
    if nodes_by_semester.is_empty() {
        nodes_by_semester.insert(1, Vec::new());
    }

    let mut positions = HashMap::with_capacity(dag.node_count());
    for (&semester, codes) in &mut nodes_by_semester {
        codes.sort_unstable();

        let x = semester as f32 * horizontal_spacing;
        let center = (codes.len() as f32 - 1.0) / 2.0;
        for (index, code) in codes.iter().enumerate() {
            let y = (center - index as f32) * vertical_spacing;
            positions.insert((*code).to_owned(), vec2(x, y));
        }
    }

    let (low, high) = positions
        .values()
        .fold(None, |range: Option<(f32, f32)>, position| {
            Some(match range {
                Some((low, high)) => (low.min(position.y), high.max(position.y)),
                None => (position.y, position.y),
            })
        })
        .unwrap_or((0.0, 0.0));

    LayeredLayout {
        positions,
        columns: nodes_by_semester.into_keys().collect(),
        y_min: low - margin,
        y_max: high + margin,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::catalog::CourseRecord;

    fn course(code: &str, semester: u32) -> CourseRecord {
        CourseRecord {
            code: code.to_owned(),
            semester,
            ..CourseRecord::default()
        }
    }

    fn sample_dag() -> CourseDag {
        CourseDag::from_courses(&[
            course("MC202", 2),
            course("MA111", 1),
            course("MC102", 1),
            course("F128", 1),
            course("MC322", 3),
            course("ME210", 3),
            course("MC458", 3),
            course("MC404", 3),
            course("LIVRE", 0),
        ])
    }

    #[test]
    fn identical_input_gives_identical_positions() {
        let dag = sample_dag();

        assert_eq!(
            layered_layout(&dag, 8.0, 3.5, 4.0),
            layered_layout(&dag, 8.0, 3.5, 4.0)
        );
    }

    #[rstest]
    #[case(1, &["F128", "MA111", "MC102"])]
    #[case(3, &["MC322", "MC404", "MC458", "ME210"])]
    fn columns_are_sorted_top_down_and_centred(#[case] semester: u32, #[case] expected: &[&str]) {
        let layout = layered_layout(&sample_dag(), 8.0, 3.5, 4.0);

        let mut column = layout
            .positions
            .iter()
            .filter(|(_, position)| position.x == semester as f32 * 8.0)
            .collect::<Vec<_>>();
        column.sort_by(|a, b| b.1.y.total_cmp(&a.1.y));

        let codes = column.iter().map(|(code, _)| code.as_str()).collect::<Vec<_>>();
        assert_eq!(codes, expected);

        let mean = column.iter().map(|(_, position)| position.y).sum::<f32>() / column.len() as f32;
        assert!(mean.abs() < 1e-5);
    }

    #[test]
    fn unassigned_semester_is_its_own_column() {
        let layout = layered_layout(&sample_dag(), 8.0, 3.5, 4.0);

        assert_eq!(layout.columns, [0, 1, 2, 3]);
        assert_eq!(layout.positions["LIVRE"], vec2(0.0, 0.0));
    }

    #[test]
    fn graph_without_semesters_uses_a_single_column() {
        let dag = CourseDag::from_courses(&[course("B", 0), course("A", 0)]);
        let layout = layered_layout(&dag, 8.0, 3.5, 4.0);

        assert_eq!(layout.columns, [1]);
        assert_eq!(layout.positions["A"], vec2(8.0, 1.75));
        assert_eq!(layout.positions["B"], vec2(8.0, -1.75));
    }

    #[test]
    fn vertical_extent_includes_margin() {
        let layout = layered_layout(&sample_dag(), 8.0, 3.5, 4.0);

        assert_eq!(layout.y_max, 1.5 * 3.5 + 4.0);
        assert_eq!(layout.y_min, -1.5 * 3.5 - 4.0);
    }

    #[test]
    fn empty_graph_has_a_default_extent() {
        let layout = layered_layout(&CourseDag::default(), 8.0, 3.5, 4.0);

        assert!(layout.positions.is_empty());
        assert_eq!((layout.y_min, layout.y_max), (-4.0, 4.0));
    }
}

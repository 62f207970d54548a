use std::collections::BTreeSet;

use crate::curriculum::CourseDag;

mod collect;
mod paths;

use self::collect::{Direction, chain_endpoints, reachable};
use self::paths::{PATH_STEP_BUDGET, PathBudget, longest_simple_path};

pub(crate) fn longest_connected_path(dag: &CourseDag, start: &str) -> BTreeSet<String> {
    longest_connected_path_with_budget(dag, start, PATH_STEP_BUDGET)
}

fn longest_connected_path_with_budget(
    dag: &CourseDag,
    start: &str,
    step_budget: usize,
) -> BTreeSet<String> {
    let mut highlighted = BTreeSet::from([start.to_owned()]);
    if !dag.contains(start) {
        return highlighted;
    }

    for direction in [Direction::Backward, Direction::Forward] {
        if let Some(path) = longest_half(dag, start, direction, step_budget) {
            highlighted.extend(path);
        }
    }

    highlighted
}

fn longest_half(
    dag: &CourseDag,
    start: &str,
    direction: Direction,
    step_budget: usize,
) -> Option<Vec<String>> {
    let reached = reachable(dag, start, direction);
    if reached.is_empty() {
        return None;
    }

    let mut allowed = reached.clone();
    allowed.insert(start);

    let mut budget = PathBudget::new(step_budget);
    let mut best: Option<Vec<String>> = None;

    for endpoint in chain_endpoints(dag, &reached, direction) {
        let (source, target) = match direction {
            Direction::Backward => (endpoint, start),
            Direction::Forward => (start, endpoint),
        };

        let Some(path) = longest_simple_path(dag, source, target, &allowed, &mut budget) else {
            continue;
        };
        if best.as_ref().is_none_or(|found| path.len() > found.len()) {
            best = Some(path);
        }

        if budget.exhausted() {
            log::debug!("path budget exhausted while highlighting {start}");
            break;
        }
    }

    best
}

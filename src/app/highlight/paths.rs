use std::collections::BTreeSet;

use crate::curriculum::CourseDag;

pub(super) const PATH_STEP_BUDGET: usize = 20_000;

pub(super) struct PathBudget {
    remaining: usize,
}

impl PathBudget {
    pub(super) fn new(steps: usize) -> Self {
        Self { remaining: steps }
    }

    fn spend(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub(super) fn exhausted(&self) -> bool {
        self.remaining == 0
    }
}

// Neighbours in code order; the first longest path wins. Keeps the best so far
// when the budget runs out.
pub(super) fn longest_simple_path(
    dag: &CourseDag,
    source: &str,
    target: &str,
    allowed: &BTreeSet<&str>,
    budget: &mut PathBudget,
) -> Option<Vec<String>> {
    if source == target {
        return Some(vec![source.to_owned()]);
    }

    let mut best: Option<Vec<String>> = None;
    let mut path = vec![source.to_owned()];
    let mut on_path = BTreeSet::from([source.to_owned()]);
    let mut cursors = vec![0usize];

    while let Some(cursor) = cursors.last_mut() {
        let Some(current) = path.last() else {
            break;
        };
        let neighbors = dag.successors(current);

        let Some(next) = neighbors.get(*cursor) else {
            cursors.pop();
            if let Some(done) = path.pop() {
                on_path.remove(&done);
            }
            continue;
        };
        *cursor += 1;

        if on_path.contains(next) || !allowed.contains(next.as_str()) {
            continue;
        }
        if !budget.spend() {
            break;
        }

        if next == target {
            if best.as_ref().is_none_or(|found| path.len() + 1 > found.len()) {
                let mut found = path.clone();
                found.push(next.clone());
                best = Some(found);
            }
            continue;
        }

        on_path.insert(next.clone());
        path.push(next.clone());
        cursors.push(0);
    }

    best
}

use std::collections::{BTreeSet, VecDeque};

use crate::curriculum::CourseDag;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub(super) fn neighbors<'a>(self, dag: &'a CourseDag, code: &str) -> &'a [String] {
        match self {
            Self::Backward => dag.predecessors(code),
            Self::Forward => dag.successors(code),
        }
    }

    pub(super) fn is_endpoint(self, dag: &CourseDag, code: &str) -> bool {
        match self {
            Self::Backward => dag.in_degree(code) == 0,
            Self::Forward => dag.out_degree(code) == 0,
        }
    }
}

pub(super) fn reachable<'a>(
    dag: &'a CourseDag,
    start: &str,
    direction: Direction,
) -> BTreeSet<&'a str> {
    let mut queue = VecDeque::from([start.to_owned()]);
    let mut visited = BTreeSet::new();

    while let Some(code) = queue.pop_front() {
        for next in direction.neighbors(dag, &code) {
            if next != start && visited.insert(next.as_str()) {
                queue.push_back(next.clone());
            }
        }
    }

    visited
}

// A cycle with no root or leaf falls back to the course with the widest reach.
pub(super) fn chain_endpoints<'a>(
    dag: &'a CourseDag,
    reached: &BTreeSet<&'a str>,
    direction: Direction,
) -> Vec<&'a str> {
    let endpoints = reached
        .iter()
        .copied()
        .filter(|code| direction.is_endpoint(dag, code))
        .collect::<Vec<_>>();
    if !endpoints.is_empty() {
        return endpoints;
    }

    let mut best: Option<(&str, usize)> = None;
    for &code in reached {
        let reach = reachable(dag, code, direction).len();
        if best.is_none_or(|(_, best_reach)| reach > best_reach) {
            best = Some((code, reach));
        }
    }

    best.map(|(code, _)| vec![code]).unwrap_or_default()
}

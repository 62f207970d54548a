use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::CourseRecord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseNode {
    pub code: String,
    pub name: String,
    // 0 when unassigned.
    pub semester: u32,
    pub credits: u32,
}

#[derive(Clone, Debug, Default)]
pub struct CourseDag {
    nodes: BTreeMap<String, CourseNode>,
    edges: Vec<(String, String)>,
    outgoing: BTreeMap<String, Vec<String>>,
    incoming: BTreeMap<String, Vec<String>>,
}

impl CourseDag {
    // Last declaration of a code wins, prerequisites included.
    pub fn from_courses(courses: &[CourseRecord]) -> Self {
        let mut latest: BTreeMap<&str, &CourseRecord> = BTreeMap::new();
        for course in courses {
            latest.insert(course.code.as_str(), course);
        }

        let mut nodes = BTreeMap::new();
        for course in latest.values() {
            nodes.insert(
                course.code.clone(),
                CourseNode {
                    code: course.code.clone(),
                    name: course.name.clone(),
                    semester: course.semester,
                    credits: course.credits,
                },
            );
        }

        let mut edge_set = BTreeSet::new();
        for course in latest.values() {
            for prerequisite in &course.prerequisites {
                if prerequisite == &course.code {
                    log::debug!("dropping self-referencing prerequisite on {}", course.code);
                    continue;
                }
                if !nodes.contains_key(prerequisite) {
                    log::debug!(
                        "dropping prerequisite {prerequisite} of {}: not in catalog",
                        course.code
                    );
                    continue;
                }
                edge_set.insert((prerequisite.clone(), course.code.clone()));
            }
        }

        let mut outgoing: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut incoming: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (source, target) in &edge_set {
            outgoing
                .entry(source.clone())
                .or_default()
                .push(target.clone());
            incoming
                .entry(target.clone())
                .or_default()
                .push(source.clone());
        }
        for neighbors in incoming.values_mut() {
            neighbors.sort();
        }

        Self {
            nodes,
            edges: edge_set.into_iter().collect(),
            outgoing,
            incoming,
        }
    }

    pub fn node(&self, code: &str) -> Option<&CourseNode> {
        self.nodes.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.nodes.contains_key(code)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CourseNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }

    pub fn successors(&self, code: &str) -> &[String] {
        self.outgoing.get(code).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn predecessors(&self, code: &str) -> &[String] {
        self.incoming.get(code).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn in_degree(&self, code: &str) -> usize {
        self.predecessors(code).len()
    }

    pub fn out_degree(&self, code: &str) -> usize {
        self.successors(code).len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

mod graph;

pub use graph::CourseDag;

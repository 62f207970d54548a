mod grades;
mod load;
mod xml;

use std::collections::HashMap;

pub use grades::{GradeRecord, GradeTable, parse_grade_csv};
pub use load::load_catalog;
pub use xml::parse_catalog_xml;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseRecord {
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub semester: u32,
    pub prerequisites: Vec<String>,
}

pub trait CourseSource {
    fn courses(&self) -> &[CourseRecord];

    fn course(&self, code: &str) -> Option<&CourseRecord>;

    fn last_grade_of(&self, code: &str, student_id: &str) -> Option<&GradeRecord>;

    fn student_ids(&self) -> &[String];

    fn has_records(&self, code: &str) -> bool;
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    courses: Vec<CourseRecord>,
    index_by_code: HashMap<String, usize>,
    grades: GradeTable,
}

impl Catalog {
    pub fn new(courses: Vec<CourseRecord>, grades: GradeTable) -> Self {
        let mut index_by_code = HashMap::with_capacity(courses.len());
        for (index, course) in courses.iter().enumerate() {
            index_by_code.insert(course.code.clone(), index);
        }

        Self {
            courses,
            index_by_code,
            grades,
        }
    }

    pub fn record_count(&self) -> usize {
        self.grades.record_count()
    }
}

impl CourseSource for Catalog {
    fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    fn course(&self, code: &str) -> Option<&CourseRecord> {
        self.index_by_code
            .get(code)
            .and_then(|&index| self.courses.get(index))
    }

    fn last_grade_of(&self, code: &str, student_id: &str) -> Option<&GradeRecord> {
        self.grades.last_record(code, student_id)
    }

    fn student_ids(&self) -> &[String] {
        self.grades.student_ids()
    }

    fn has_records(&self, code: &str) -> bool {
        self.grades.has_course(code)
    }
}

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use super::{Catalog, parse_catalog_xml, parse_grade_csv};

pub fn load_catalog(catalog_path: &Path, grades_path: &Path) -> Result<Catalog> {
    let raw_catalog = fs::read_to_string(catalog_path)
        .with_context(|| format!("failed to read course catalog {}", catalog_path.display()))?;
    let courses = parse_catalog_xml(&raw_catalog)
        .with_context(|| format!("failed to parse course catalog {}", catalog_path.display()))?;

    if courses.is_empty() {
        return Err(anyhow!(
            "course catalog {} declares no courses",
            catalog_path.display()
        ));
    }

    let grades_file = File::open(grades_path)
        .with_context(|| format!("failed to open grade export {}", grades_path.display()))?;
    let grades = parse_grade_csv(grades_file)
        .with_context(|| format!("failed to parse grade export {}", grades_path.display()))?;

    log::info!(
        "loaded {} courses, {} graded courses, {} students",
        courses.len(),
        grades.course_count(),
        grades.student_ids().len()
    );

    Ok(Catalog::new(courses, grades))
}

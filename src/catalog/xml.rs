use anyhow::{Context, Result};
use serde::Deserialize;

use super::CourseRecord;

#[derive(Debug, Default, Deserialize)]
struct RawCatalog {
    #[serde(default, rename = "course")]
    courses: Vec<RawCourse>,
}

#[derive(Debug, Deserialize)]
struct RawCourse {
    #[serde(rename = "@code")]
    code: String,
    #[serde(default, rename = "@name")]
    name: Option<String>,
    #[serde(default, rename = "@credits")]
    credits: Option<String>,
    #[serde(default, rename = "@semester")]
    semester: Option<String>,
    #[serde(default, rename = "prerequisite")]
    prerequisites: Vec<String>,
}

fn lenient_count(value: Option<&str>) -> u32 {
    value
        .and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

pub fn parse_catalog_xml(raw: &str) -> Result<Vec<CourseRecord>> {
    let catalog: RawCatalog =
        quick_xml::de::from_str(raw).context("invalid course catalog XML")?;

    let courses = catalog
        .courses
        .into_iter()
        .filter_map(|raw_course| {
            let code = raw_course.code.trim().to_owned();
            if code.is_empty() {
                return None;
            }

            let prerequisites = raw_course
                .prerequisites
                .iter()
                .map(|prerequisite| prerequisite.trim().to_owned())
                .filter(|prerequisite| !prerequisite.is_empty())
                .collect();

            Some(CourseRecord {
                code,
                name: raw_course.name.unwrap_or_default().trim().to_owned(),
                credits: lenient_count(raw_course.credits.as_deref()),
                semester: lenient_count(raw_course.semester.as_deref()),
                prerequisites,
            })
        })
        .collect();

    Ok(courses)
}

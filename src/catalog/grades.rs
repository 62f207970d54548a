use std::collections::{BTreeSet, HashMap};
use std::io::Read;

use anyhow::{Context, Result, anyhow};

#[derive(Clone, Debug, PartialEq)]
pub struct GradeRecord {
    pub student_id: String,
    pub class_group: String,
    pub grade: f32,
    pub attendance: f32,
}

#[derive(Clone, Debug, Default)]
pub struct GradeTable {
    records: HashMap<String, Vec<GradeRecord>>,
    student_ids: Vec<String>,
}

impl GradeTable {
    pub fn new(records: HashMap<String, Vec<GradeRecord>>, student_ids: Vec<String>) -> Self {
        let student_ids = student_ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            records,
            student_ids,
        }
    }

    pub fn last_record(&self, code: &str, student_id: &str) -> Option<&GradeRecord> {
        self.records
            .get(code)?
            .iter()
            .rev()
            .find(|record| record.student_id == student_id)
    }

    pub fn has_course(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    pub fn student_ids(&self) -> &[String] {
        &self.student_ids
    }

    pub fn course_count(&self) -> usize {
        self.records.len()
    }

    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }
}

struct CourseBlock {
    code: String,
    class_column: usize,
    grade_column: usize,
    attendance_column: usize,
}

// Spreadsheet exports suffix repeated headers with `.1`, `.2`.
fn base_course_code(header: &str) -> &str {
    header.split('.').next().unwrap_or(header).trim()
}

fn parse_number(cell: Option<&str>) -> Option<f32> {
    cell.and_then(|value| value.trim().parse::<f32>().ok())
        .filter(|value| value.is_finite())
}

fn course_blocks(headers: &csv::StringRecord) -> Vec<CourseBlock> {
    let mut blocks = Vec::new();

    for start in (1..headers.len()).step_by(3) {
        if start + 2 >= headers.len() {
            continue;
        }

        let code = base_course_code(headers.get(start + 1).unwrap_or_default());
        if code.is_empty() || code.eq_ignore_ascii_case("turma") || code.eq_ignore_ascii_case("freq")
        {
            continue;
        }

        blocks.push(CourseBlock {
            code: code.to_owned(),
            class_column: start,
            grade_column: start + 1,
            attendance_column: start + 2,
        });
    }

    blocks
}

// Student column, then (class group, grade, attendance) triples.
pub fn parse_grade_csv<R: Read>(reader: R) -> Result<GradeTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .context("grade export has no header row")?
        .clone();
    if headers.is_empty() {
        return Err(anyhow!("grade export header row is empty"));
    }

    let blocks = course_blocks(&headers);
    let mut records: HashMap<String, Vec<GradeRecord>> = HashMap::new();
    for block in &blocks {
        records.entry(block.code.clone()).or_default();
    }

    let mut student_ids = Vec::new();
    let mut skipped_cells = 0usize;

    for (row_index, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("malformed grade export row {}", row_index + 2))?;
        let Some(student_id) = row.get(0).filter(|id| !id.is_empty()) else {
            continue;
        };
        student_ids.push(student_id.to_owned());

        for block in &blocks {
            let grade = parse_number(row.get(block.grade_column));
            let attendance = parse_number(row.get(block.attendance_column));
            let (Some(grade), Some(attendance)) = (grade, attendance) else {
                skipped_cells += 1;
                continue;
            };

            records
                .entry(block.code.clone())
                .or_default()
                .push(GradeRecord {
                    student_id: student_id.to_owned(),
                    class_group: row.get(block.class_column).unwrap_or_default().to_owned(),
                    grade,
                    attendance,
                });
        }
    }

    if skipped_cells > 0 {
        log::warn!("skipped {skipped_cells} grade cells without a numeric grade and attendance");
    }

    Ok(GradeTable::new(records, student_ids))
}

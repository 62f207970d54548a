use eframe::egui::{Color32, Rect, pos2, vec2};

use crate::catalog::CourseSource;

use super::color::{ABSENT_GRADE_COLOR, grade_color};

const MAX_COLUMNS: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum HeatmapOrdering {
    #[default]
    Descending,
    Ascending,
    StudentSequence,
}

impl HeatmapOrdering {
    pub(crate) const ALL: [Self; 3] = [Self::Descending, Self::Ascending, Self::StudentSequence];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Descending => "Highest grade first",
            Self::Ascending => "Lowest grade first",
            Self::StudentSequence => "By student id",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct HeatmapCell {
    pub(crate) rect: Rect,
    pub(crate) grade: Option<f32>,
    pub(crate) color: Color32,
}

pub(crate) fn grade_samples(source: &dyn CourseSource, code: &str) -> Vec<Option<f32>> {
    if !source.has_records(code) {
        return Vec::new();
    }

    source
        .student_ids()
        .iter()
        .map(|student_id| {
            source
                .last_grade_of(code, student_id)
                .map(|record| record.grade)
                .filter(|grade| *grade >= 0.0)
                .map(|grade| grade.min(10.0))
        })
        .collect()
}

pub(crate) fn order_samples(samples: &[Option<f32>], ordering: HeatmapOrdering) -> Vec<Option<f32>> {
    let mut present = samples.iter().filter_map(|sample| *sample).collect::<Vec<_>>();
    let absent = samples.len() - present.len();

    match ordering {
        HeatmapOrdering::StudentSequence => return samples.to_vec(),
        HeatmapOrdering::Descending => present.sort_by(|a, b| b.total_cmp(a)),
        HeatmapOrdering::Ascending => present.sort_by(f32::total_cmp),
    }

    present
        .into_iter()
        .map(Some)
        .chain(std::iter::repeat_n(None, absent))
        .collect()
}

pub(crate) fn heatmap_cells(
    samples: &[Option<f32>],
    bounds: Rect,
    ordering: HeatmapOrdering,
) -> Vec<HeatmapCell> {
    if samples.is_empty() {
        return Vec::new();
    }

    let ordered = order_samples(samples, ordering);
    let columns = MAX_COLUMNS.min(ordered.len());
    let rows = ordered.len().div_ceil(columns);
    let cell_size = vec2(bounds.width() / columns as f32, bounds.height() / rows as f32);

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, grade)| {
            let row = index / columns;
            let column = index % columns;
            let min = pos2(
                bounds.left() + column as f32 * cell_size.x,
                bounds.top() + row as f32 * cell_size.y,
            );

            HeatmapCell {
                rect: Rect::from_min_size(min, cell_size),
                grade,
                color: grade.map_or(ABSENT_GRADE_COLOR, grade_color),
            }
        })
        .collect()
}

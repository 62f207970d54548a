use eframe::egui::Color32;

pub(crate) const ABSENT_GRADE_COLOR: Color32 = Color32::from_rgb(0xCC, 0xCC, 0xCC);

const PASS_THRESHOLD: f32 = 6.0;
const PASS_LOW: Color32 = Color32::from_rgb(144, 238, 144);
const PASS_HIGH: Color32 = Color32::from_rgb(0, 100, 0);
const FAIL_LOW: Color32 = Color32::from_rgb(139, 0, 0);
const FAIL_HIGH: Color32 = Color32::from_rgb(255, 182, 193);

fn lerp_channel(start: u8, end: u8, t: f32) -> u8 {
    (start as f32 * (1.0 - t) + end as f32 * t)
        .round()
        .clamp(0.0, 255.0) as u8
}

fn lerp_color(start: Color32, end: Color32, t: f32) -> Color32 {
    Color32::from_rgb(
        lerp_channel(start.r(), end.r(), t),
        lerp_channel(start.g(), end.g(), t),
        lerp_channel(start.b(), end.b(), t),
    )
}

pub(crate) fn grade_color(grade: f32) -> Color32 {
    if grade >= PASS_THRESHOLD {
        lerp_color(PASS_LOW, PASS_HIGH, (grade - PASS_THRESHOLD) / 4.0)
    } else {
        lerp_color(FAIL_LOW, FAIL_HIGH, grade / PASS_THRESHOLD)
    }
}

pub(crate) fn color_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

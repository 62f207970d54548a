use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub box_width: f32,
    pub box_height: f32,
    pub column_margin: f32,
    pub label_pick_radius: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 8.0,
            vertical_spacing: 3.5,
            box_width: 3.5,
            box_height: 2.5,
            column_margin: 4.0,
            label_pick_radius: 0.9,
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("invalid layout config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout config {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("in layout config {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        let positive = [
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
            ("box_width", self.box_width),
            ("box_height", self.box_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                bail!("{field} must be a positive number, got {value}");
            }
        }

        let non_negative = [
            ("column_margin", self.column_margin),
            ("label_pick_radius", self.label_pick_radius),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                bail!("{field} must not be negative, got {value}");
            }
        }

        Ok(())
    }
}

//! Report configuration.
//! Fixed input/output locations and chart dimensions for a report run.

use std::path::PathBuf;

/// Settings for a single report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    /// Multi-page document (one chart per slide)
    pub deck_path: PathBuf,
    /// Standalone raster image
    pub image_path: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub deck_title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("ny_shooting_inc.csv"),
            deck_path: PathBuf::from("output_visuals.pptx"),
            image_path: PathBuf::from("output_visuals.png"),
            chart_width: 1400,
            chart_height: 1000,
            deck_title: "NYPD Shooting Incident Data".to_string(),
        }
    }
}

#[cfg(test)]
impl ReportConfig {
    /// Config rooted in `dir`, keeping the default file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let defaults = Self::default();
        Self {
            input_path: dir.join(&defaults.input_path),
            deck_path: dir.join(&defaults.deck_path),
            image_path: dir.join(&defaults.image_path),
            ..defaults
        }
    }
}

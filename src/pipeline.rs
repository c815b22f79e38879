//! Report pipeline: load, clean, render every catalogue chart, save.

use crate::charts::catalog;
use crate::charts::{ChartRenderer, ChartSpec, CountTable};
use crate::config::ReportConfig;
use crate::data::{IncidentCleaner, IncidentLoader};
use crate::ppt::{PptGenerator, Slide};
use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use std::path::PathBuf;
use tracing::{debug, info};

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rows: usize,
    pub deck_pages: usize,
    pub deck_path: PathBuf,
    pub image_path: PathBuf,
}

/// Load and clean the incident table.
pub fn load_incidents(config: &ReportConfig) -> Result<DataFrame> {
    let mut loader = IncidentLoader::new();
    loader
        .load_csv(&config.input_path)
        .with_context(|| format!("loading {}", config.input_path.display()))?;
    debug!(rows = loader.get_row_count(), "Checking incident schema");
    let df = loader.prepare().context("checking incident schema")?;
    IncidentCleaner::clean(df).context("cleaning incident table")
}

/// Tabulate a chart's counts.
pub fn tabulate(df: &DataFrame, spec: &ChartSpec) -> Result<CountTable> {
    CountTable::tally(df, spec.field, spec.hue)
        .with_context(|| format!("counting '{}'", spec.title))
}

/// Tabulate and render one chart to PNG bytes.
fn render(df: &DataFrame, spec: &ChartSpec, config: &ReportConfig) -> Result<Vec<u8>> {
    let table = tabulate(df, spec)?;
    debug!(
        chart = spec.title,
        categories = table.categories.len(),
        total = table.total(),
        "Tabulated"
    );
    ChartRenderer::render_png(spec, &table, config.chart_width, config.chart_height)
        .with_context(|| format!("rendering '{}'", spec.title))
}

/// Run the whole report. Outputs are only written once every chart has
/// rendered.
pub fn run(config: &ReportConfig) -> Result<RunSummary> {
    let df = load_incidents(config)?;

    let slides = catalog::deck_charts()
        .map(|spec| {
            render(&df, spec, config).map(|png| Slide {
                title: spec.title.to_string(),
                png,
                width: config.chart_width,
                height: config.chart_height,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let images = catalog::image_charts()
        .map(|spec| render(&df, spec, config))
        .collect::<Result<Vec<_>>>()?;
    info!(pages = slides.len(), images = images.len(), "Rendered charts");

    PptGenerator::generate_ppt_from_bytes(&slides, &config.deck_path, &config.deck_title)
        .with_context(|| format!("writing {}", config.deck_path.display()))?;

    // Single image target
    if let Some(png) = images.first() {
        PptGenerator::write_image(png, &config.image_path)
            .with_context(|| format!("writing {}", config.image_path.display()))?;
    }

    Ok(RunSummary {
        rows: df.height(),
        deck_pages: slides.len(),
        deck_path: config.deck_path.clone(),
        image_path: config.image_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::catalog::CHARTS;
    use crate::data::fixtures::{write_sample_csv, SAMPLE_ROWS};
    use crate::data::schema::BORO;
    use std::fs::{self, File};
    use tempfile::tempdir;
    use zip::ZipArchive;

    #[test]
    fn test_load_incidents_cleans_table() {
        let dir = tempdir().unwrap();
        let config = ReportConfig::in_dir(dir.path());
        write_sample_csv(&config.input_path, &SAMPLE_ROWS);

        let df = load_incidents(&config).unwrap();
        assert_eq!(df.height(), SAMPLE_ROWS.len());
        assert!(df.get_columns().iter().all(|c| c.null_count() == 0));
    }

    #[test]
    fn test_every_chart_tabulates_all_rows() {
        let dir = tempdir().unwrap();
        let config = ReportConfig::in_dir(dir.path());
        write_sample_csv(&config.input_path, &SAMPLE_ROWS);
        let df = load_incidents(&config).unwrap();

        for spec in CHARTS.iter() {
            let table = tabulate(&df, spec).unwrap();
            assert_eq!(table.total(), df.height(), "{}", spec.title);
        }

        let boroughs = tabulate(&df, &CHARTS[8]).unwrap();
        assert_eq!(boroughs.field, BORO);
        assert_eq!(boroughs.categories, vec!["QUEENS", "BRONX"]);
    }

    #[test]
    fn test_run_writes_deck_and_image() {
        let dir = tempdir().unwrap();
        let config = ReportConfig::in_dir(dir.path());
        write_sample_csv(&config.input_path, &SAMPLE_ROWS);

        let summary = run(&config).unwrap();
        assert_eq!(summary.rows, SAMPLE_ROWS.len());
        assert_eq!(summary.deck_pages, catalog::deck_charts().count());

        let mut archive = ZipArchive::new(File::open(&config.deck_path).unwrap()).unwrap();
        assert!(archive.by_name("ppt/slides/slide9.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide10.xml").is_err());
        assert!(archive.by_name("ppt/media/image9.png").is_ok());

        let png = fs::read(&config.image_path).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert!(!dir.path().join("output_visuals.pptx.part").exists());
    }

    #[test]
    fn test_missing_input_fails_without_outputs() {
        let dir = tempdir().unwrap();
        let config = ReportConfig::in_dir(dir.path());

        let err = run(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("not found"));
        assert!(!config.deck_path.exists());
        assert!(!config.image_path.exists());
    }
}

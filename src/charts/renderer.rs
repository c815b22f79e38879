//! Static Chart Renderer
//! Draws count charts with plotters and encodes them as PNG bytes.
//!
//! Layout:
//! 1. Title centered above the plot
//! 2. One bar per category (grouped bars when split by a hue field)
//! 3. Category ticks on the category axis, optionally rotated 90 degrees
//! 4. Legend in the upper right for hue charts

use crate::charts::catalog::{ChartSpec, Orientation, Palette};
use crate::charts::CountTable;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::io::Cursor;
use thiserror::Error;

const FONT: &str = "sans-serif";

// seaborn "deep"
const DEEP: [RGBColor; 10] = [
    RGBColor(76, 114, 176),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
    RGBColor(196, 78, 82),
    RGBColor(129, 114, 179),
    RGBColor(147, 120, 96),
    RGBColor(218, 139, 195),
    RGBColor(140, 140, 140),
    RGBColor(204, 185, 116),
    RGBColor(100, 181, 205),
];

// seaborn "pastel"
const PASTEL: [RGBColor; 10] = [
    RGBColor(161, 201, 244),
    RGBColor(255, 180, 130),
    RGBColor(141, 229, 161),
    RGBColor(255, 159, 155),
    RGBColor(208, 187, 255),
    RGBColor(222, 187, 155),
    RGBColor(250, 176, 228),
    RGBColor(207, 207, 207),
    RGBColor(255, 254, 163),
    RGBColor(185, 242, 240),
];

/// Fraction of a category slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to plot for '{0}'")]
    Empty(String),
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Pixel buffer does not match {0}x{1}")]
    Buffer(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(err.to_string())
    }
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render one count chart to PNG bytes.
    pub fn render_png(
        spec: &ChartSpec,
        table: &CountTable,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        if table.is_empty() {
            return Err(RenderError::Empty(table.field.clone()));
        }

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;
            match spec.orientation {
                Orientation::Vertical => Self::draw_vertical(&root, spec, table)?,
                Orientation::Horizontal => Self::draw_horizontal(&root, spec, table)?,
            }
            root.present()?;
        }

        Self::encode_png(buffer, width, height)
    }

    fn draw_vertical(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        spec: &ChartSpec,
        table: &CountTable,
    ) -> Result<(), RenderError> {
        let n = table.categories.len();
        let label_area = if spec.rotate_labels { 170 } else { 60 };
        let labels = &table.categories;
        let formatter = |v: &f64| Self::tick_label(labels, *v, false);

        let mut chart = ChartBuilder::on(root)
            .caption(spec.title, (FONT, 26))
            .margin(20)
            .x_label_area_size(label_area)
            .y_label_area_size(80)
            .build_cartesian_2d(
                -0.5..(n as f64 - 0.5),
                0usize..Self::axis_top(table.max_count()),
            )?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n + 1)
            .x_label_formatter(&formatter)
            .x_label_style(Self::tick_font(spec.rotate_labels))
            .x_desc(spec.category_label)
            .y_desc(spec.count_label)
            .axis_desc_style((FONT, 18))
            .draw()?;

        for (s, name) in table.series.iter().enumerate() {
            let bars = (0..n).map(|c| {
                let (lo, hi) = Self::bar_span(c as f64, s, table.series.len());
                Rectangle::new(
                    [(lo, 0), (hi, table.count(c, s))],
                    Self::bar_color(spec.palette, table, c, s).filled(),
                )
            });
            let anno = chart.draw_series(bars)?;
            if table.has_hue() {
                let color = Self::bar_color(spec.palette, table, 0, s);
                anno.label(name.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled())
                });
            }
        }

        if table.has_hue() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .label_font((FONT, 16))
                .draw()?;
        }

        Ok(())
    }

    /// Categories run top to bottom, first category at the top.
    fn draw_horizontal(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        spec: &ChartSpec,
        table: &CountTable,
    ) -> Result<(), RenderError> {
        let n = table.categories.len();
        let labels = &table.categories;
        let formatter = |v: &f64| Self::tick_label(labels, *v, true);

        let mut chart = ChartBuilder::on(root)
            .caption(spec.title, (FONT, 26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(if spec.rotate_labels { 80 } else { 120 })
            .build_cartesian_2d(
                0usize..Self::axis_top(table.max_count()),
                -0.5..(n as f64 - 0.5),
            )?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n + 1)
            .y_label_formatter(&formatter)
            .y_label_style(Self::tick_font(spec.rotate_labels))
            .x_desc(spec.count_label)
            .y_desc(spec.category_label)
            .axis_desc_style((FONT, 18))
            .draw()?;

        for (s, name) in table.series.iter().enumerate() {
            let bars = (0..n).map(|c| {
                let position = (n - 1 - c) as f64;
                let (lo, hi) = Self::bar_span(position, s, table.series.len());
                Rectangle::new(
                    [(0, lo), (table.count(c, s), hi)],
                    Self::bar_color(spec.palette, table, c, s).filled(),
                )
            });
            let anno = chart.draw_series(bars)?;
            if table.has_hue() {
                let color = Self::bar_color(spec.palette, table, 0, s);
                anno.label(name.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled())
                });
            }
        }

        if table.has_hue() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .label_font((FONT, 16))
                .draw()?;
        }

        Ok(())
    }

    /// Label for a category-axis tick. Each category owns a unit slot
    /// centered on its index and off-center ticks stay blank. `reversed`
    /// when the first category sits at the highest position.
    fn tick_label(labels: &[String], value: f64, reversed: bool) -> String {
        let slot = value.round();
        if slot < 0.0 || (value - slot).abs() > 1e-6 {
            return String::new();
        }
        let slot = slot as usize;
        if slot >= labels.len() {
            return String::new();
        }
        let idx = if reversed { labels.len() - 1 - slot } else { slot };
        labels[idx].clone()
    }

    /// Extent of a bar along the category axis.
    fn bar_span(position: f64, series: usize, series_count: usize) -> (f64, f64) {
        let bar = GROUP_WIDTH / series_count.max(1) as f64;
        let lo = position - GROUP_WIDTH / 2.0 + series as f64 * bar;
        (lo, lo + bar)
    }

    /// Count-axis upper bound with some headroom over the tallest bar.
    fn axis_top(max_count: usize) -> usize {
        max_count + max_count / 10 + 1
    }

    fn tick_font(rotate: bool) -> FontDesc<'static> {
        let font = (FONT, 14).into_font();
        if rotate {
            font.transform(FontTransform::Rotate90)
        } else {
            font
        }
    }

    /// Hue charts color by series, plain count charts by category.
    fn bar_color(palette: Palette, table: &CountTable, category: usize, series: usize) -> RGBColor {
        let colors = match palette {
            Palette::Deep => &DEEP,
            Palette::Pastel => &PASTEL,
        };
        let idx = if table.has_hue() { series } else { category };
        colors[idx % colors.len()]
    }

    fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::Buffer(width, height))?;
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, ImageFormat::Png)?;
        Ok(png.into_inner())
    }
}

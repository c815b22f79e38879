//! The fixed set of count charts in the report, in page order.

use crate::data::schema::{
    BORO, OCCUR_YEAR, PERP_AGE_GROUP, PERP_RACE, PERP_SEX, STATISTICAL_MURDER_FLAG, VIC_AGE_GROUP,
    VIC_RACE, VIC_SEX,
};

/// Which axis carries the categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along X, counts up the Y axis
    Vertical,
    /// Categories along Y, counts along the X axis
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Deep,
    Pastel,
}

/// Where a rendered chart ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Deck,
    Image,
}

/// Definition of a single count chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub field: &'static str,
    pub hue: Option<&'static str>,
    pub orientation: Orientation,
    pub palette: Palette,
    pub title: &'static str,
    pub category_label: &'static str,
    pub count_label: &'static str,
    /// Rotate category tick labels by 90 degrees
    pub rotate_labels: bool,
    pub target: Target,
}

impl ChartSpec {
    const fn counts(field: &'static str, title: &'static str, category_label: &'static str) -> Self {
        Self {
            field,
            hue: None,
            orientation: Orientation::Vertical,
            palette: Palette::Deep,
            title,
            category_label,
            count_label: "Count",
            rotate_labels: false,
            target: Target::Deck,
        }
    }

    const fn rotated(mut self) -> Self {
        self.rotate_labels = true;
        self
    }

    const fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    const fn pastel(mut self) -> Self {
        self.palette = Palette::Pastel;
        self
    }

    const fn split_by(mut self, hue: &'static str) -> Self {
        self.hue = Some(hue);
        self
    }

    const fn standalone(mut self) -> Self {
        self.target = Target::Image;
        self
    }
}

pub static CHARTS: [ChartSpec; 10] = [
    ChartSpec::counts(VIC_RACE, "Victim Race - Counts", "Race").rotated(),
    ChartSpec::counts(VIC_AGE_GROUP, "Victim Age Group - Counts", "Age Group"),
    ChartSpec::counts(VIC_SEX, "Victim Sex - Counts", "Sex"),
    ChartSpec::counts(PERP_RACE, "Perpetrator Race - Counts", "Race").rotated(),
    ChartSpec::counts(PERP_AGE_GROUP, "Perpetrator Age Group - Counts", "Age Group"),
    ChartSpec::counts(PERP_SEX, "Perpetrator Sex - Counts", "Sex"),
    ChartSpec::counts(OCCUR_YEAR, "Count of Incidents by Year", "Year").horizontal(),
    ChartSpec::counts(
        OCCUR_YEAR,
        "NY Shooting Victims by Year - Survived (Flag - False) & Murdered (Flag - True)",
        "Year",
    )
    .horizontal()
    .split_by(STATISTICAL_MURDER_FLAG)
    .standalone(),
    ChartSpec::counts(BORO, "Count of Incidents by Boroughs", "Borough")
        .rotated()
        .pastel(),
    ChartSpec::counts(
        BORO,
        "NY Shooting Victims by Boroughs - Survived (Flag - False) & Murdered (Flag - True)",
        "Borough",
    )
    .rotated()
    .pastel()
    .split_by(STATISTICAL_MURDER_FLAG),
];

/// Charts that become pages of the report deck, in page order.
pub fn deck_charts() -> impl Iterator<Item = &'static ChartSpec> {
    CHARTS.iter().filter(|c| c.target == Target::Deck)
}

/// Charts written as standalone images.
pub fn image_charts() -> impl Iterator<Item = &'static ChartSpec> {
    CHARTS.iter().filter(|c| c.target == Target::Image)
}

//! Column names of the incident extract.

pub const INCIDENT_KEY: &str = "INCIDENT_KEY";
pub const OCCUR_DATE: &str = "OCCUR_DATE";
pub const OCCUR_TIME: &str = "OCCUR_TIME";
pub const BORO: &str = "BORO";
pub const PRECINCT: &str = "PRECINCT";
pub const STATISTICAL_MURDER_FLAG: &str = "STATISTICAL_MURDER_FLAG";
pub const PERP_AGE_GROUP: &str = "PERP_AGE_GROUP";
pub const PERP_SEX: &str = "PERP_SEX";
pub const PERP_RACE: &str = "PERP_RACE";
pub const VIC_AGE_GROUP: &str = "VIC_AGE_GROUP";
pub const VIC_SEX: &str = "VIC_SEX";
pub const VIC_RACE: &str = "VIC_RACE";

/// Derived during cleaning.
pub const OCCUR_YEAR: &str = "OCCUR_YEAR";

/// Columns kept for charting.
pub const KEPT_COLUMNS: [&str; 12] = [
    INCIDENT_KEY,
    OCCUR_DATE,
    OCCUR_TIME,
    BORO,
    PRECINCT,
    STATISTICAL_MURDER_FLAG,
    PERP_AGE_GROUP,
    PERP_SEX,
    PERP_RACE,
    VIC_AGE_GROUP,
    VIC_SEX,
    VIC_RACE,
];

/// Columns present in the extract but never used downstream.
pub const DROPPED_COLUMNS: [&str; 7] = [
    "JURISDICTION_CODE",
    "LOCATION_DESC",
    "X_COORD_CD",
    "Y_COORD_CD",
    "Latitude",
    "Longitude",
    "Lon_Lat",
];

//! Sample extract rows shared by tests.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub const HEADER: &str = "INCIDENT_KEY,OCCUR_DATE,OCCUR_TIME,BORO,PRECINCT,JURISDICTION_CODE,LOCATION_DESC,STATISTICAL_MURDER_FLAG,PERP_AGE_GROUP,PERP_SEX,PERP_RACE,VIC_AGE_GROUP,VIC_SEX,VIC_RACE,X_COORD_CD,Y_COORD_CD,Latitude,Longitude,Lon_Lat";

pub const SAMPLE_ROWS: [&str; 4] = [
    "228798151,05/27/2021,21:30:00,QUEENS,105,0,,false,,,,18-24,M,BLACK,1058925,180924,40.66,-73.73,POINT (-73.73 40.66)",
    "137471050,06/27/2014,17:40:00,BRONX,40,0,,false,940,M,BLACK,18-24,M,BLACK,1005028,234516,40.81,-73.92,POINT (-73.92 40.81)",
    "147998800,11/21/2015,03:56:00,QUEENS,113,0,,true,25-44,M,WHITE,25-44,,WHITE,1043458,184750,40.67,-73.78,POINT (-73.78 40.67)",
    "146837977,10/09/2015,18:30:00,BRONX,44,0,MULTI DWELL - APT BUILD,false,<NA>,n/a,#N/A,<18,F,BLACK HISPANIC,1007667,243926,40.84,-73.91,POINT (-73.91 40.84)",
];

fn write_rows(out: &mut impl Write, rows: &[&str]) {
    writeln!(out, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(out, "{}", row).unwrap();
    }
}

pub fn create_test_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    write_rows(&mut file, rows);
    file
}

pub fn write_sample_csv(path: &Path, rows: &[&str]) {
    let mut file = File::create(path).unwrap();
    write_rows(&mut file, rows);
}

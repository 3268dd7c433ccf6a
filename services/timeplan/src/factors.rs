//! Operator factor names and the product codes they imply.

use anyhow::{bail, Result};
use wx_time::ProductCode;

/// Factor name to product code. Modifiers carry -1 and never affect timing.
const FACTORS: &[(&str, ProductCode)] = &[
    // Surface and upper-air station plots
    ("temperature", 0),
    ("dewpoint", 0),
    ("dewpoint_depression", 0),
    ("barbs", 0),
    ("pressure", 1),
    ("current_weather", 1),
    ("cloud_coverage", 1),
    ("height", 2),
    // Gridded model contours and fills
    ("temp_contours", 3),
    ("thickness_500_1000", 3),
    ("gridded_barbs", 3),
    ("cape_contours", 3),
    ("cin_contours", 3),
    ("pressure_contours", 4),
    ("dew_contours", 4),
    ("height_contours", 5),
    ("wind_contours", 5),
    ("temp_fill", 6),
    ("wind_speed_fill", 6),
    ("temp_advect_fill", 6),
    ("relative_vorticity_fill", 6),
    ("absolute_vorticity_fill", 7),
    // Satellite
    ("sat_channel_2", 8),
    ("sat_channel_9", 8),
    ("sat_channel_14", 8),
    ("sat_truecolor", 8),
    ("sat_west", -1),
    // Convective outlooks
    ("day1", 9),
    ("day2", 10),
    ("day3", 11),
    ("day4", 12),
    ("day5", 12),
    ("day6", 12),
    ("day7", 12),
    ("day8", 12),
    ("conv_fill", -1),
    // Warnings, watches and reports
    ("warnings", 13),
    ("torwarnings", 13),
    ("svrwarnings", 13),
    ("marwarnings", 13),
    ("flowarnings", 13),
    ("watches", 14),
    ("reports", 15),
    ("hailreports", 15),
    ("torreports", 15),
];

pub fn code_for(factor: &str) -> Option<ProductCode> {
    let factor = factor.trim().to_lowercase();
    FACTORS
        .iter()
        .find(|(name, _)| *name == factor)
        .map(|(_, code)| *code)
}

/// Product codes for every requested factor, in request order.
pub fn codes_for<S: AsRef<str>>(factors: &[S]) -> Result<Vec<ProductCode>> {
    let mut codes = Vec::with_capacity(factors.len());
    for factor in factors {
        match code_for(factor.as_ref()) {
            Some(code) => codes.push(code),
            None => bail!("Unknown factor '{}'", factor.as_ref()),
        }
    }
    Ok(codes)
}

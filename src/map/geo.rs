use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error, Result};
use lazy_static::lazy_static;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> LatLng {
        LatLng { lat, lng }
    }

    /// Renders the coordinate the way the address field shows it,
    /// e.g. `35.68950, 139.69200` for a precision of 5.
    pub fn format_address(&self, precision: usize) -> String {
        format!(
            "{:.prec$}, {:.prec$}",
            self.lat,
            self.lng,
            prec = precision
        )
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

impl FromStr for LatLng {
    type Err = Error;

    fn from_str(input: &str) -> Result<LatLng> {
        lazy_static! {
            static ref LAT_LNG_REGEX: Regex =
                Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*[,\s]\s*(-?\d+(?:\.\d+)?)\s*$").unwrap();
        }

        let caps = LAT_LNG_REGEX
            .captures(input)
            .ok_or_else(|| anyhow!("'{}' is not a '<lat>, <lng>' coordinate", input))?;

        let lat: f64 = caps[1].parse()?;
        let lng: f64 = caps[2].parse()?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(anyhow!("coordinate {}, {} is out of range", lat, lng));
        }

        Ok(LatLng { lat, lng })
    }
}

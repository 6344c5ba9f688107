use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_this_or_that::as_f64;

use crate::map::geo::LatLng;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferDetails {
    pub title: Option<String>,
    pub address: Option<String>,
    /// Unreadable prices are kept as NaN so they fail every bracket.
    #[serde(default, deserialize_with = "opt_price")]
    pub price: Option<f64>,
    #[serde(rename = "type")]
    pub housing_type: Option<String>,
    /// Counts are kept in their textual form, which is what the selects compare against.
    #[serde(default, deserialize_with = "opt_count")]
    pub rooms: Option<String>,
    #[serde(default, deserialize_with = "opt_count")]
    pub guests: Option<String>,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub features: Option<Vec<String>>,
    pub description: Option<String>,
    pub photos: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "as_f64")]
    pub lat: f64,
    #[serde(deserialize_with = "as_f64")]
    pub lng: f64,
}

impl From<Location> for LatLng {
    fn from(location: Location) -> Self {
        LatLng::new(location.lat, location.lng)
    }
}

/// A rental listing as served by the data endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub offer: OfferDetails,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HousingType {
    Palace,
    Flat,
    House,
    Bungalow,
    Hotel,
}

impl HousingType {
    pub fn parse(value: &str) -> Option<HousingType> {
        match value {
            "palace" => Some(HousingType::Palace),
            "flat" => Some(HousingType::Flat),
            "house" => Some(HousingType::House),
            "bungalow" => Some(HousingType::Bungalow),
            "hotel" => Some(HousingType::Hotel),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HousingType::Palace => "Дворец",
            HousingType::Flat => "Квартира",
            HousingType::House => "Дом",
            HousingType::Bungalow => "Бунгало",
            HousingType::Hotel => "Отель",
        }
    }
}

impl fmt::Display for HousingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Prices come back as numbers, numeric strings, free text or null.
// A single odd record must not sink the whole list.
fn opt_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().parse().unwrap_or(f64::NAN)),
        Value::Number(num) => Some(num.as_f64().unwrap_or(f64::NAN)),
        _ => Some(f64::NAN),
    })
}

fn opt_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(num) => Some(num.to_string()),
        other => Some(other.to_string()),
    })
}

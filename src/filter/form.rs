use std::collections::BTreeSet;
use std::str::FromStr;

use anyhow::{anyhow, Error, Result};

use super::selection::{Choice, FilterSelection, PriceBracket, ANY};

pub const FEATURES: [&str; 6] = [
    "wifi",
    "dishwasher",
    "parking",
    "washer",
    "elevator",
    "conditioner",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterControl {
    HousingType,
    HousingPrice,
    HousingRooms,
    HousingGuests,
    Features,
}

impl FromStr for FilterControl {
    type Err = Error;

    fn from_str(name: &str) -> Result<FilterControl> {
        match name.trim() {
            "housing-type" | "type" => Ok(FilterControl::HousingType),
            "housing-price" | "price" => Ok(FilterControl::HousingPrice),
            "housing-rooms" | "rooms" => Ok(FilterControl::HousingRooms),
            "housing-guests" | "guests" => Ok(FilterControl::HousingGuests),
            "features" => Ok(FilterControl::Features),
            other => Err(anyhow!("Unknown filter control '{}'", other)),
        }
    }
}

/// Raw values of the filter form controls, read on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
    housing_type: String,
    housing_price: String,
    housing_rooms: String,
    housing_guests: String,
    features: BTreeSet<String>,
}

impl Default for FilterForm {
    fn default() -> Self {
        FilterForm {
            housing_type: ANY.to_string(),
            housing_price: ANY.to_string(),
            housing_rooms: ANY.to_string(),
            housing_guests: ANY.to_string(),
            features: BTreeSet::new(),
        }
    }
}

impl FilterForm {
    pub fn new() -> FilterForm {
        FilterForm::default()
    }

    /// Sets a select control. For `features` the value is a comma separated
    /// list of checked boxes, an empty value unchecks all of them.
    pub fn set(&mut self, control: FilterControl, value: &str) -> Result<()> {
        let value = value.trim();
        match control {
            FilterControl::HousingType => self.housing_type = select_value(value),
            FilterControl::HousingPrice => {
                PriceBracket::from_str(value)?;
                self.housing_price = select_value(value);
            }
            FilterControl::HousingRooms => self.housing_rooms = select_value(value),
            FilterControl::HousingGuests => self.housing_guests = select_value(value),
            FilterControl::Features => {
                let mut checked = BTreeSet::new();
                for feature in value.split(',').map(str::trim).filter(|f| !f.is_empty()) {
                    checked.insert(known_feature(feature)?);
                }
                self.features = checked;
            }
        }
        Ok(())
    }

    /// Flips one feature checkbox, returns whether it is now checked.
    pub fn toggle_feature(&mut self, feature: &str) -> Result<bool> {
        let feature = known_feature(feature.trim())?;
        if self.features.remove(&feature) {
            Ok(false)
        } else {
            self.features.insert(feature);
            Ok(true)
        }
    }

    pub fn reset(&mut self) {
        *self = FilterForm::default();
    }

    pub fn value(&self, control: FilterControl) -> String {
        match control {
            FilterControl::HousingType => self.housing_type.clone(),
            FilterControl::HousingPrice => self.housing_price.clone(),
            FilterControl::HousingRooms => self.housing_rooms.clone(),
            FilterControl::HousingGuests => self.housing_guests.clone(),
            FilterControl::Features => self
                .features
                .iter()
                .cloned()
                .collect::<Vec<String>>()
                .join(","),
        }
    }

    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            housing_type: Choice::parse(&self.housing_type),
            price: self.housing_price.parse().unwrap_or_default(),
            rooms: Choice::parse(&self.housing_rooms),
            guests: Choice::parse(&self.housing_guests),
            features: self.features.clone(),
        }
    }
}

fn select_value(value: &str) -> String {
    if value.is_empty() {
        ANY.to_string()
    } else {
        value.to_string()
    }
}

fn known_feature(feature: &str) -> Result<String> {
    if FEATURES.contains(&feature) {
        Ok(feature.to_string())
    } else {
        Err(anyhow!(
            "Unknown feature '{}', expected one of: {}",
            feature,
            FEATURES.join(", ")
        ))
    }
}

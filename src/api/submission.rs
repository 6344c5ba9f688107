use anyhow::{anyhow, Result};

use crate::map::geo::LatLng;

/// Body of the "new ad" form, posted form-encoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdSubmission {
    pub title: String,
    pub address: String,
    pub housing_type: String,
    pub price: u64,
    pub timein: String,
    pub timeout: String,
    pub rooms: u32,
    pub capacity: u32,
    pub features: Vec<String>,
    pub description: String,
}

impl AdSubmission {
    pub fn new(title: &str, address: LatLng, precision: usize) -> AdSubmission {
        AdSubmission {
            title: title.to_string(),
            address: address.format_address(precision),
            housing_type: "flat".to_string(),
            timein: "12:00".to_string(),
            timeout: "12:00".to_string(),
            rooms: 1,
            capacity: 1,
            ..AdSubmission::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(anyhow!("Title is required"));
        }
        if self.address.trim().is_empty() {
            return Err(anyhow!("Address is required"));
        }
        Ok(())
    }

    /// Features are sent as repeated `features` pairs, like checkboxes in a form.
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("title", self.title.clone()),
            ("address", self.address.clone()),
            ("type", self.housing_type.clone()),
            ("price", self.price.to_string()),
            ("timein", self.timein.clone()),
            ("timeout", self.timeout.clone()),
            ("rooms", self.rooms.to_string()),
            ("capacity", self.capacity.to_string()),
        ];
        for feature in &self.features {
            pairs.push(("features", feature.clone()));
        }
        pairs.push(("description", self.description.clone()));
        pairs
    }
}

use std::collections::BTreeSet;
use std::str::FromStr;

use anyhow::{anyhow, Error, Result};

pub const ANY: &str = "any";

/// A select control value: either "any" or one concrete option.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice {
    #[default]
    Any,
    Value(String),
}

impl Choice {
    pub fn parse(value: &str) -> Choice {
        let value = value.trim();
        if value.is_empty() || value == ANY {
            Choice::Any
        } else {
            Choice::Value(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Choice::Any => ANY,
            Choice::Value(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceBracket {
    #[default]
    Any,
    Low,
    Middle,
    High,
}

impl PriceBracket {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBracket::Any => ANY,
            PriceBracket::Low => "low",
            PriceBracket::Middle => "middle",
            PriceBracket::High => "high",
        }
    }
}

impl FromStr for PriceBracket {
    type Err = Error;

    fn from_str(value: &str) -> Result<PriceBracket> {
        match value.trim() {
            "" | ANY => Ok(PriceBracket::Any),
            "low" => Ok(PriceBracket::Low),
            "middle" => Ok(PriceBracket::Middle),
            "high" => Ok(PriceBracket::High),
            other => Err(anyhow!(
                "Unknown price bracket '{}', expected any, low, middle or high",
                other
            )),
        }
    }
}

/// Snapshot of the five filter controls, decoupled from the form itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub housing_type: Choice,
    pub price: PriceBracket,
    pub rooms: Choice,
    pub guests: Choice,
    pub features: BTreeSet<String>,
}

impl FilterSelection {
    pub fn any() -> FilterSelection {
        FilterSelection::default()
    }

    pub fn with_type(mut self, housing_type: &str) -> FilterSelection {
        self.housing_type = Choice::parse(housing_type);
        self
    }

    pub fn with_price(mut self, price: PriceBracket) -> FilterSelection {
        self.price = price;
        self
    }

    pub fn with_rooms(mut self, rooms: &str) -> FilterSelection {
        self.rooms = Choice::parse(rooms);
        self
    }

    pub fn with_guests(mut self, guests: &str) -> FilterSelection {
        self.guests = Choice::parse(guests);
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> FilterSelection
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }
}

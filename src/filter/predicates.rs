use crate::models::offer::Offer;

use super::selection::{Choice, FilterSelection, PriceBracket};

/// Bracket boundaries for the price select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLimits {
    pub low_max: u64,
    pub high_min: u64,
}

impl Default for PriceLimits {
    fn default() -> Self {
        PriceLimits {
            low_max: 10000,
            high_min: 50000,
        }
    }
}

// Zero and blank count as "not filled in", same as a missing value.
fn filled_count(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != "0")
        .map(str::to_string)
}

fn matches_choice(choice: &Choice, value: Option<String>) -> bool {
    match (choice, value) {
        (Choice::Any, _) => true,
        (_, None) => true,
        (Choice::Value(selected), Some(value)) => *selected == value,
    }
}

/// Every checked feature must be listed on the offer.
pub fn check_features(offer: &Offer, selection: &FilterSelection) -> bool {
    if selection.features.is_empty() {
        return true;
    }
    match &offer.offer.features {
        None => true,
        Some(features) => selection
            .features
            .iter()
            .all(|selected| features.iter().any(|feature| feature == selected)),
    }
}

pub fn check_type(offer: &Offer, selection: &FilterSelection) -> bool {
    let housing_type = offer
        .offer
        .housing_type
        .clone()
        .filter(|value| !value.is_empty());
    matches_choice(&selection.housing_type, housing_type)
}

pub fn check_rooms(offer: &Offer, selection: &FilterSelection) -> bool {
    let rooms = filled_count(&offer.offer.rooms);
    matches_choice(&selection.rooms, rooms)
}

pub fn check_guests(offer: &Offer, selection: &FilterSelection) -> bool {
    let guests = filled_count(&offer.offer.guests);
    matches_choice(&selection.guests, guests)
}

/// Compares the real price; an unreadable (NaN) price fails every bracket but `any`.
pub fn check_price(offer: &Offer, selection: &FilterSelection, limits: &PriceLimits) -> bool {
    let price = match offer.offer.price.filter(|p| *p != 0.0) {
        Some(price) => price,
        None => return true,
    };
    let low_max = limits.low_max as f64;
    let high_min = limits.high_min as f64;

    match selection.price {
        PriceBracket::Any => true,
        PriceBracket::Low => price <= low_max,
        PriceBracket::Middle => price >= low_max && price <= high_min,
        PriceBracket::High => price >= high_min,
    }
}

pub mod form;
pub mod predicates;
pub mod selection;

use crate::{config::Config, models::offer::Offer};

use predicates::{check_features, check_guests, check_price, check_rooms, check_type, PriceLimits};
use selection::FilterSelection;

/// Narrows the full offer list down to what the map should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterEngine {
    pub max_markers: usize,
    pub prices: PriceLimits,
}

impl FilterEngine {
    pub fn from_config(config: &Config) -> FilterEngine {
        FilterEngine {
            max_markers: config.max_markers,
            prices: PriceLimits {
                low_max: config.low_price_max,
                high_min: config.high_price_min,
            },
        }
    }

    pub fn matches(&self, offer: &Offer, selection: &FilterSelection) -> bool {
        check_features(offer, selection)
            && check_type(offer, selection)
            && check_rooms(offer, selection)
            && check_guests(offer, selection)
            && check_price(offer, selection, &self.prices)
    }

    /// Offers passing every predicate, in their original order, capped at `max_markers`.
    pub fn apply(&self, offers: &[Offer], selection: &FilterSelection) -> Vec<Offer> {
        offers
            .iter()
            .filter(|offer| self.matches(offer, selection))
            .take(self.max_markers)
            .cloned()
            .collect()
    }

    /// The unfiltered first page shown right after loading.
    pub fn first_page(&self, offers: &[Offer]) -> Vec<Offer> {
        offers.iter().take(self.max_markers).cloned().collect()
    }
}

use crate::models::offer::{HousingType, Offer};

/// Builds the popup content for an offer marker.
pub trait CardTemplate: Send + Sync {
    fn create_card(&self, offer: &Offer) -> String;
}

/// Plain-text card: one line per filled-in field, empty fields are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainCard;

impl CardTemplate for PlainCard {
    fn create_card(&self, offer: &Offer) -> String {
        let details = &offer.offer;
        let mut lines: Vec<String> = Vec::new();

        if let Some(title) = &details.title {
            lines.push(title.clone());
        }
        if let Some(address) = &details.address {
            lines.push(address.clone());
        }
        if let Some(price) = details.price.filter(|p| p.is_finite()) {
            lines.push(format!("{} ₽/ночь", price));
        }
        if let Some(housing_type) = &details.housing_type {
            let label = HousingType::parse(housing_type)
                .map(|known| known.label().to_string())
                .unwrap_or_else(|| housing_type.clone());
            lines.push(label);
        }
        if let (Some(rooms), Some(guests)) = (&details.rooms, &details.guests) {
            lines.push(format!("{} комнаты для {} гостей", rooms, guests));
        }
        if let (Some(checkin), Some(checkout)) = (&details.checkin, &details.checkout) {
            lines.push(format!("Заезд после {}, выезд до {}", checkin, checkout));
        }
        if let Some(features) = details.features.as_ref().filter(|f| !f.is_empty()) {
            lines.push(features.join(", "));
        }
        if let Some(description) = &details.description {
            lines.push(description.clone());
        }
        if let Some(photos) = details.photos.as_ref().filter(|p| !p.is_empty()) {
            lines.push(format!("Фотографий: {}", photos.len()));
        }

        lines.join("\n")
    }
}

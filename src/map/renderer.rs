use log::debug;

use crate::models::offer::Offer;

use super::{card::CardTemplate, marker::Marker, surface::MapSurface};

/// Clears the offer layer and draws one marker per offer, in order.
pub fn create_multiple_marker(
    surface: &mut MapSurface,
    offers: &[Offer],
    template: &dyn CardTemplate,
) {
    surface.clear_offer_layer();

    for offer in offers {
        let marker = Marker::new(offer.location.into(), surface.secondary_icon().clone())
            .bind_popup(template.create_card(offer));
        surface.add_offer_marker(marker);
    }

    debug!("Rendered {} offer markers", surface.offer_layer().len());
}

use anyhow::{anyhow, Result};
use log::{debug, info};

use crate::config::Config;

use super::{
    geo::LatLng,
    icon::Icon,
    marker::{LayerGroup, Marker},
};

pub type LoadHook = Box<dyn FnMut(bool) + Send>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

/// The map viewport with its draggable main marker and the offer layer.
///
/// Created when the page mounts and dropped with it; everything the map
/// owns lives here instead of in globals.
pub struct MapSurface {
    default_position: LatLng,
    precision: usize,
    view: View,
    tile_layer: TileLayer,
    main_marker: Marker,
    secondary_icon: Icon,
    offer_layer: LayerGroup,
    open_popup: Option<usize>,
    address: String,
    loaded: bool,
    on_load: Option<LoadHook>,
}

impl MapSurface {
    pub fn mount(config: &Config) -> MapSurface {
        let default_position = LatLng::new(config.map_center_lat, config.map_center_lng);
        let main_marker = Marker::new(default_position, Icon::main(config)).draggable();

        MapSurface {
            default_position,
            precision: config.address_precision,
            view: View {
                center: default_position,
                zoom: config.map_zoom,
            },
            tile_layer: TileLayer {
                url: config.tile_layer_url.clone(),
                attribution: config.tile_attribution.clone(),
            },
            main_marker,
            secondary_icon: Icon::secondary(config),
            offer_layer: LayerGroup::new(),
            open_popup: None,
            address: default_position.format_address(config.address_precision),
            loaded: false,
            on_load: None,
        }
    }

    /// Registers the callback fired with `true` once the map has loaded.
    pub fn on_load<F>(&mut self, hook: F)
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.on_load = Some(Box::new(hook));
    }

    pub fn handle_load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        info!(
            "Map loaded at {} zoom {}",
            self.view.center.format_address(self.precision),
            self.view.zoom
        );
        if let Some(hook) = self.on_load.as_mut() {
            hook(true);
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn tile_layer(&self) -> &TileLayer {
        &self.tile_layer
    }

    pub fn default_position(&self) -> LatLng {
        self.default_position
    }

    pub fn main_marker(&self) -> &Marker {
        &self.main_marker
    }

    pub fn main_marker_position(&self) -> LatLng {
        self.main_marker.position
    }

    /// Moves the main marker and writes its coordinates into the address field.
    pub fn drag_main_marker(&mut self, to: LatLng) {
        self.main_marker.set_lat_lng(to);
        self.handle_move_end();
    }

    fn handle_move_end(&mut self) {
        self.address = self.main_marker.position.format_address(self.precision);
        debug!("Address set to {}", self.address);
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn reset_map(&mut self) {
        self.main_marker.set_lat_lng(self.default_position);
        self.handle_move_end();
        self.close_popup();
    }

    pub fn secondary_icon(&self) -> &Icon {
        &self.secondary_icon
    }

    pub fn offer_layer(&self) -> &LayerGroup {
        &self.offer_layer
    }

    /// Empties the offer layer. A popup bound to a removed marker closes with it.
    pub fn clear_offer_layer(&mut self) {
        self.offer_layer.clear_layers();
        self.open_popup = None;
    }

    pub fn add_offer_marker(&mut self, marker: Marker) {
        self.offer_layer.add_layer(marker);
    }

    pub fn open_popup(&mut self, index: usize) -> Result<&str> {
        let marker = self
            .offer_layer
            .get(index)
            .ok_or_else(|| anyhow!("No marker with index {}", index))?;
        let content = marker
            .popup
            .as_deref()
            .ok_or_else(|| anyhow!("Marker {} has no popup", index))?;
        self.open_popup = Some(index);
        Ok(content)
    }

    pub fn close_popup(&mut self) {
        self.open_popup = None;
    }

    pub fn open_popup_index(&self) -> Option<usize> {
        self.open_popup
    }

    pub fn open_popup_content(&self) -> Option<&str> {
        self.open_popup
            .and_then(|index| self.offer_layer.get(index))
            .and_then(|marker| marker.popup.as_deref())
    }
}

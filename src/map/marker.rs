use super::{geo::LatLng, icon::Icon};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub icon: Icon,
    pub draggable: bool,
    pub popup: Option<String>,
}

impl Marker {
    pub fn new(position: LatLng, icon: Icon) -> Marker {
        Marker {
            position,
            icon,
            draggable: false,
            popup: None,
        }
    }

    pub fn draggable(mut self) -> Marker {
        self.draggable = true;
        self
    }

    pub fn bind_popup(mut self, content: String) -> Marker {
        self.popup = Some(content);
        self
    }

    pub fn set_lat_lng(&mut self, position: LatLng) {
        self.position = position;
    }
}

/// Holds the offer markers; always cleared wholesale before a redraw.
#[derive(Debug, Default)]
pub struct LayerGroup {
    markers: Vec<Marker>,
}

impl LayerGroup {
    pub fn new() -> LayerGroup {
        LayerGroup::default()
    }

    pub fn clear_layers(&mut self) {
        self.markers.clear();
    }

    pub fn add_layer(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

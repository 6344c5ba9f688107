use crate::config::Config;

/// Marker icon: image url, pixel size and the pixel pinned to the coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub url: String,
    pub size: (u32, u32),
    pub anchor: (u32, u32),
}

impl Icon {
    /// Anchored at bottom-center so the pin tip sits on the point.
    pub fn main(config: &Config) -> Icon {
        let size = config.main_marker_size;
        Icon {
            url: config.main_marker_icon_url.clone(),
            size: (size, size),
            anchor: (size / 2, size),
        }
    }

    pub fn secondary(config: &Config) -> Icon {
        let size = config.offer_marker_size;
        Icon {
            url: config.offer_marker_icon_url.clone(),
            size: (size, size),
            anchor: (size / 2, size / 2),
        }
    }
}

pub mod card;
pub mod geo;
pub mod icon;
pub mod marker;
pub mod renderer;
pub mod surface;

//! Service-area validation for the weather proxy.
//!
//! The dashboard only serves Australian and New Zealand cities, so every
//! inbound coordinate pair is checked against two fixed bounding boxes
//! before any upstream request is made.

/// A closed (boundary-inclusive) latitude/longitude rectangle.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    /// Southern edge in degrees latitude
    pub lat_min: f64,
    /// Northern edge in degrees latitude
    pub lat_max: f64,
    /// Western edge in degrees longitude
    pub lon_min: f64,
    /// Eastern edge in degrees longitude
    pub lon_max: f64,
}

impl BoundingBox {
    /// Returns true if the point lies inside the box, boundaries included.
    ///
    /// Non-finite inputs always fall outside.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        if !lat.is_finite() || !lon.is_finite() {
            return false;
        }
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }
}

/// Approximate bounding box for mainland Australia and Tasmania.
pub const AUSTRALIA: BoundingBox = BoundingBox {
    lat_min: -43.6,
    lat_max: -10.7,
    lon_min: 113.3,
    lon_max: 153.6,
};

/// Approximate bounding box for New Zealand.
pub const NEW_ZEALAND: BoundingBox = BoundingBox {
    lat_min: -47.3,
    lat_max: -34.4,
    lon_min: 166.4,
    lon_max: 178.6,
};

/// Returns true if the coordinates fall within the Australia or New Zealand
/// service area.
pub fn is_valid_region(lat: f64, lon: f64) -> bool {
    AUSTRALIA.contains(lat, lon) || NEW_ZEALAND.contains(lat, lon)
}

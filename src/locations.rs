//! Static city presets for the dashboard.
//!
//! The dashboard offers a fixed set of Australian and New Zealand cities;
//! their coordinates all fall inside the service-area bounding boxes.

use serde::Serialize;

/// Country a preset city belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Country {
    Australia,
    NewZealand,
}

/// A preset dashboard city.
///
/// Uses `&'static str` fields so the table can be a static array.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct City {
    /// Unique identifier, e.g. "sydney"
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    pub country: Country,
    pub latitude: f64,
    pub longitude: f64,
}

/// Static array of all preset cities shown on the dashboard.
pub static CITIES: [City; 12] = [
    City {
        id: "sydney",
        name: "Sydney",
        country: Country::Australia,
        latitude: -33.8688,
        longitude: 151.2093,
    },
    City {
        id: "melbourne",
        name: "Melbourne",
        country: Country::Australia,
        latitude: -37.8136,
        longitude: 144.9631,
    },
    City {
        id: "brisbane",
        name: "Brisbane",
        country: Country::Australia,
        latitude: -27.4698,
        longitude: 153.0251,
    },
    City {
        id: "perth",
        name: "Perth",
        country: Country::Australia,
        latitude: -31.9523,
        longitude: 115.8613,
    },
    City {
        id: "adelaide",
        name: "Adelaide",
        country: Country::Australia,
        latitude: -34.9285,
        longitude: 138.6007,
    },
    City {
        id: "canberra",
        name: "Canberra",
        country: Country::Australia,
        latitude: -35.2809,
        longitude: 149.1300,
    },
    City {
        id: "hobart",
        name: "Hobart",
        country: Country::Australia,
        latitude: -42.8821,
        longitude: 147.3272,
    },
    City {
        id: "darwin",
        name: "Darwin",
        country: Country::Australia,
        latitude: -12.4634,
        longitude: 130.8456,
    },
    City {
        id: "auckland",
        name: "Auckland",
        country: Country::NewZealand,
        latitude: -36.8509,
        longitude: 174.7645,
    },
    City {
        id: "wellington",
        name: "Wellington",
        country: Country::NewZealand,
        latitude: -41.2924,
        longitude: 174.7787,
    },
    City {
        id: "christchurch",
        name: "Christchurch",
        country: Country::NewZealand,
        latitude: -43.5320,
        longitude: 172.6306,
    },
    City {
        id: "queenstown",
        name: "Queenstown",
        country: Country::NewZealand,
        latitude: -45.0312,
        longitude: 168.6626,
    },
];

/// Get a city by its ID.
pub fn get_city_by_id(id: &str) -> Option<&'static City> {
    CITIES.iter().find(|city| city.id == id)
}

/// Get all preset cities.
pub fn all_cities() -> &'static [City] {
    &CITIES
}

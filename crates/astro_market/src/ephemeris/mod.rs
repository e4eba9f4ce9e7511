pub mod model;
pub mod types;

pub use model::{normalize_degrees, BodyMotion, EphemerisSettings, LinearEphemeris};
pub use types::{CelestialBody, ChartPositions, Nature, PlanetPosition};

pub mod generator;
pub mod session;
pub mod types;

pub use generator::{TimelineGenerator, TimelineSettings};
pub use session::{MarketSession, DEFAULT_INDIAN_SYMBOLS};
pub use types::{HoraAction, HoraSentiment, Timeline, TimelineSlot};

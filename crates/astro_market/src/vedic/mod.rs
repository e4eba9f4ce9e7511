pub mod dignities;
pub mod hora;
pub mod nakshatra;

pub use dignities::{dignity_of, dignity_of_name, rulership, Dignity, Rulership};
pub use hora::{hora_lord, hora_start_index, weekday_lord, HORA_SEQUENCE};
pub use nakshatra::{
    nakshatra_of, nakshatra_placement, Nakshatra, NakshatraPlacement, NAKSHATRA_SEGMENT_SIZE,
};

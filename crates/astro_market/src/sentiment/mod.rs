pub mod overrides;
pub mod scorer;
pub mod types;

pub use overrides::{OutcomeOverride, OutcomeOverrides};
pub use scorer::{ScoringSettings, SentimentScorer, WeekdayBias};
pub use types::{SentimentLabel, SentimentResult};

//! Core race-results logic for rowing regattas.
//!
//! This crate contains the pure computation behind official results sheets:
//! - Time codec: parsing and formatting operator-entered race times
//! - Race codes: the short event identifier printed on start lists
//! - Result evaluation: finish positions within a race
//! - Points: mapping finish positions to competition points

pub mod points;
pub mod race_code;
pub mod results;
pub mod time_codec;
pub mod types;

pub use points::{FEDERATION_POINTS_SCALE, PointsCalculator, PointsTable};
pub use race_code::{BoatClassDescriptor, CategoryDescriptor, RaceCodeRules};
pub use results::{
    LaneEntry, LaneOutcome, LaneSubmission, RaceEvaluation, ResultsSubmission, compute_positions,
    evaluate_race, publish,
};
pub use types::{
    Gender, Lane, LaneResult, LaneStatus, Race, UnknownLaneStatus, ValidationError, WeightClass,
};

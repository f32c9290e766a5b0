//! Core type definitions with validation.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for race structures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Lane numbers start at 1.
    #[error("lane number must be at least 1")]
    LaneNumberZero,

    /// Two lanes in the same race share a number.
    #[error("lane {lane} appears more than once in the race")]
    DuplicateLane { lane: u32 },

    /// Only lanes that finished may carry an elapsed time.
    #[error("lane {lane} has status {status} but carries an elapsed time")]
    TimeOnNonOkLane { lane: u32, status: LaneStatus },

    /// A finish position requires an `ok` status and an elapsed time.
    #[error("lane {lane} has a finish position without a valid time")]
    PositionWithoutTime { lane: u32 },

    /// Finish positions are 1-based.
    #[error("lane {lane} has finish position 0")]
    PositionZero { lane: u32 },

    /// Unrecognized gender value.
    #[error("unknown gender: {value}")]
    UnknownGender { value: String },

    /// Unrecognized weight class value.
    #[error("unknown weight class: {value}")]
    UnknownWeightClass { value: String },
}

/// Outcome status of a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LaneStatus {
    /// Finished; the only status that may carry a time.
    #[default]
    Ok,
    /// Did not start.
    Dns,
    /// Did not finish.
    Dnf,
    /// Disqualified.
    Dsq,
    /// Absent.
    Abs,
}

impl LaneStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Dns => "dns",
            Self::Dnf => "dnf",
            Self::Dsq => "dsq",
            Self::Abs => "abs",
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for LaneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LaneStatus {
    type Err = UnknownLaneStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "dns" => Ok(Self::Dns),
            "dnf" => Ok(Self::Dnf),
            "dsq" => Ok(Self::Dsq),
            "abs" => Ok(Self::Abs),
            _ => Err(UnknownLaneStatus(s.to_string())),
        }
    }
}

impl Serialize for LaneStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LaneStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown lane status strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown lane status: {0}")]
pub struct UnknownLaneStatus(String);

/// Gender of a race category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Men,
    Women,
    Mixed,
}

impl Gender {
    /// Prefix used when the gender is spelled out in a race code.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Men => "M",
            Self::Women => "W",
            Self::Mixed => "Mix",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "men" | "m" => Ok(Self::Men),
            "women" | "w" => Ok(Self::Women),
            "mixed" | "mix" => Ok(Self::Mixed),
            _ => Err(ValidationError::UnknownGender {
                value: s.to_string(),
            }),
        }
    }
}

/// Weight class of a boat class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightClass {
    #[default]
    Open,
    Lightweight,
}

impl FromStr for WeightClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "lightweight" | "lw" => Ok(Self::Lightweight),
            _ => Err(ValidationError::UnknownWeightClass {
                value: s.to_string(),
            }),
        }
    }
}

/// Stored result of a single lane.
///
/// Serialized in the shape the results endpoint expects, so absent values
/// are written as `null` rather than skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneResult {
    #[serde(default)]
    pub status: LaneStatus,

    /// Elapsed time in milliseconds.
    #[serde(default)]
    pub elapsed_ms: Option<u64>,

    /// 1-based rank within the race.
    #[serde(default)]
    pub finish_position: Option<u32>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl LaneResult {
    /// Checks the result against the lane invariants.
    pub fn validate(&self, lane: u32) -> Result<(), ValidationError> {
        if !self.status.is_ok() && self.elapsed_ms.is_some() {
            return Err(ValidationError::TimeOnNonOkLane {
                lane,
                status: self.status,
            });
        }
        match self.finish_position {
            Some(0) => Err(ValidationError::PositionZero { lane }),
            Some(_) if !self.status.is_ok() || self.elapsed_ms.is_none() => {
                Err(ValidationError::PositionWithoutTime { lane })
            }
            _ => Ok(()),
        }
    }
}

/// One competing entry in a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    pub lane_number: u32,

    /// Reference to the athlete or crew.
    pub athlete_or_crew: String,

    /// Reference to the club.
    pub club: String,

    #[serde(default)]
    pub result: LaneResult,
}

impl Lane {
    /// Creates a lane with an empty result, as done when a race is scheduled.
    pub fn new(
        lane_number: u32,
        athlete_or_crew: impl Into<String>,
        club: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if lane_number == 0 {
            return Err(ValidationError::LaneNumberZero);
        }
        Ok(Self {
            lane_number,
            athlete_or_crew: athlete_or_crew.into(),
            club: club.into(),
            result: LaneResult::default(),
        })
    }
}

/// A single race within a competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    /// Position of the race in the competition schedule.
    pub order: u32,

    /// Heat, repechage, semifinal, final, ...
    pub phase: String,

    #[serde(default)]
    pub lanes: Vec<Lane>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u32>,
}

impl Race {
    pub fn new(order: u32, phase: impl Into<String>) -> Self {
        Self {
            order,
            phase: phase.into(),
            lanes: Vec::new(),
            distance_meters: None,
        }
    }

    /// Looks up a lane by its number.
    pub fn lane(&self, lane_number: u32) -> Option<&Lane> {
        self.lanes.iter().find(|l| l.lane_number == lane_number)
    }

    /// Checks lane numbering and every stored result.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = BTreeSet::new();
        for lane in &self.lanes {
            if lane.lane_number == 0 {
                return Err(ValidationError::LaneNumberZero);
            }
            if !seen.insert(lane.lane_number) {
                return Err(ValidationError::DuplicateLane {
                    lane: lane.lane_number,
                });
            }
            lane.result.validate(lane.lane_number)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_status_roundtrip_all_variants() {
        let variants = [
            LaneStatus::Ok,
            LaneStatus::Dns,
            LaneStatus::Dnf,
            LaneStatus::Dsq,
            LaneStatus::Abs,
        ];

        for variant in &variants {
            let s = variant.to_string();
            let parsed: LaneStatus = s.parse().expect("should parse");
            assert_eq!(parsed, *variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn lane_status_parse_is_case_insensitive() {
        assert_eq!("DNF".parse::<LaneStatus>().unwrap(), LaneStatus::Dnf);
        assert_eq!(" Dsq ".parse::<LaneStatus>().unwrap(), LaneStatus::Dsq);
    }

    #[test]
    fn unknown_lane_status_errors() {
        let err = "retired".parse::<LaneStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown lane status: retired");
    }

    #[test]
    fn lane_status_serializes_lowercase() {
        let json = serde_json::to_string(&LaneStatus::Dns).unwrap();
        assert_eq!(json, r#""dns""#);
        let parsed: LaneStatus = serde_json::from_str(r#""ABS""#).unwrap();
        assert_eq!(parsed, LaneStatus::Abs);
    }

    #[test]
    fn new_lane_starts_empty_and_ok() {
        let lane = Lane::new(3, "crew-17", "club-4").unwrap();
        assert_eq!(lane.result.status, LaneStatus::Ok);
        assert_eq!(lane.result.elapsed_ms, None);
        assert_eq!(lane.result.finish_position, None);
    }

    #[test]
    fn lane_zero_rejected() {
        assert_eq!(
            Lane::new(0, "crew", "club").unwrap_err(),
            ValidationError::LaneNumberZero
        );
    }

    #[test]
    fn result_with_time_on_dnf_lane_is_invalid() {
        let result = LaneResult {
            status: LaneStatus::Dnf,
            elapsed_ms: Some(420_000),
            finish_position: None,
            notes: None,
        };
        assert_eq!(
            result.validate(2),
            Err(ValidationError::TimeOnNonOkLane {
                lane: 2,
                status: LaneStatus::Dnf
            })
        );
    }

    #[test]
    fn result_with_position_but_no_time_is_invalid() {
        let result = LaneResult {
            finish_position: Some(1),
            ..LaneResult::default()
        };
        assert_eq!(
            result.validate(5),
            Err(ValidationError::PositionWithoutTime { lane: 5 })
        );
    }

    #[test]
    fn race_rejects_duplicate_lanes() {
        let mut race = Race::new(1, "heat");
        race.lanes.push(Lane::new(1, "a", "x").unwrap());
        race.lanes.push(Lane::new(1, "b", "y").unwrap());
        assert_eq!(
            race.validate(),
            Err(ValidationError::DuplicateLane { lane: 1 })
        );
    }

    #[test]
    fn lane_result_serializes_nulls_in_camel_case() {
        let json = serde_json::to_string(&LaneResult::default()).unwrap();
        assert_eq!(
            json,
            r#"{"status":"ok","elapsedMs":null,"finishPosition":null,"notes":null}"#
        );
    }

    #[test]
    fn gender_and_weight_class_parse() {
        assert_eq!("Women".parse::<Gender>().unwrap(), Gender::Women);
        assert_eq!("mix".parse::<Gender>().unwrap(), Gender::Mixed);
        assert_eq!(
            "lightweight".parse::<WeightClass>().unwrap(),
            WeightClass::Lightweight
        );
        assert!("heavy".parse::<WeightClass>().is_err());
    }
}

//! Finish positions, points and published results for a single race.
//!
//! # Algorithm Summary
//!
//! 1. Keep lanes whose status is `ok` and whose entered time parses
//! 2. Sort them by `(elapsed_ms, lane_number)`
//! 3. Assign positions 1..k in that order
//!
//! Everything else stays unranked. The same entries always produce the same
//! positions, so the live preview and the saved results agree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::points::{PointsCalculator, PointsTable};
use crate::time_codec;
use crate::types::{Lane, LaneResult, LaneStatus, Race};

/// A lane as entered by the operator, before evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneEntry {
    pub lane: u32,

    #[serde(default)]
    pub status: LaneStatus,

    /// Time exactly as typed; empty when not yet timed.
    #[serde(default)]
    pub raw_time: String,

    #[serde(default)]
    pub notes: Option<String>,
}

impl LaneEntry {
    pub fn new(lane: u32, status: LaneStatus, raw_time: impl Into<String>) -> Self {
        Self {
            lane,
            status,
            raw_time: raw_time.into(),
            notes: None,
        }
    }

    /// Rebuilds the entry for a lane from its stored result, for re-entry.
    pub fn from_lane(lane: &Lane) -> Self {
        Self {
            lane: lane.lane_number,
            status: lane.result.status,
            raw_time: lane
                .result
                .elapsed_ms
                .map(time_codec::format)
                .unwrap_or_default(),
            notes: lane.result.notes.clone(),
        }
    }

    /// Elapsed time if the lane finished with a valid time.
    pub fn elapsed_ms(&self) -> Option<u64> {
        if self.status.is_ok() {
            time_codec::parse(&self.raw_time)
        } else {
            None
        }
    }
}

/// Computes finish positions, keyed by lane number.
///
/// Equal times are broken by ascending lane number. Lanes that are not `ok`
/// or have no parsable time get no entry.
pub fn compute_positions(entries: &[LaneEntry]) -> BTreeMap<u32, u32> {
    let mut candidates: Vec<(u64, u32)> = entries
        .iter()
        .filter_map(|entry| entry.elapsed_ms().map(|ms| (ms, entry.lane)))
        .collect();
    candidates.sort_unstable();

    candidates
        .into_iter()
        .zip(1u32..)
        .map(|((_, lane), position)| (lane, position))
        .collect()
}

/// Evaluated outcome of one lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneOutcome {
    pub lane: u32,
    pub status: LaneStatus,
    pub elapsed_ms: Option<u64>,
    pub finish_position: Option<u32>,
    pub points: u32,

    /// Gap to the winner in milliseconds, for ranked lanes.
    pub gap_ms: Option<u64>,

    /// `M:SS.cc`, `S.cc` or `-`.
    pub time_display: String,

    /// Gap without the leading `+`; empty for the winner and unranked lanes.
    pub gap_display: String,

    pub notes: Option<String>,
}

impl LaneOutcome {
    /// The stored form of this outcome.
    pub fn to_lane_result(&self) -> LaneResult {
        LaneResult {
            status: self.status,
            elapsed_ms: self.elapsed_ms,
            finish_position: self.finish_position,
            notes: self.notes.clone(),
        }
    }
}

/// Result of evaluating all lanes of a race.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceEvaluation {
    /// One outcome per entry, in lane order.
    pub lanes: Vec<LaneOutcome>,
}

impl RaceEvaluation {
    pub fn outcome(&self, lane: u32) -> Option<&LaneOutcome> {
        self.lanes.iter().find(|o| o.lane == lane)
    }

    pub fn positions(&self) -> BTreeMap<u32, u32> {
        self.lanes
            .iter()
            .filter_map(|o| o.finish_position.map(|p| (o.lane, p)))
            .collect()
    }

    pub fn points(&self) -> BTreeMap<u32, u32> {
        self.lanes.iter().map(|o| (o.lane, o.points)).collect()
    }

    /// Outcomes in results-sheet order: ranked lanes by position, then
    /// unranked lanes by lane number.
    pub fn standings(&self) -> Vec<&LaneOutcome> {
        let mut rows: Vec<&LaneOutcome> = self.lanes.iter().collect();
        rows.sort_by_key(|o| (o.finish_position.unwrap_or(u32::MAX), o.lane));
        rows
    }
}

/// Evaluates a race: positions, points, display times and gaps per lane.
pub fn evaluate_race(
    entries: &[LaneEntry],
    calculator: &PointsCalculator,
    custom_points: Option<&PointsTable>,
) -> RaceEvaluation {
    let positions = compute_positions(entries);

    let leader_ms = entries
        .iter()
        .filter(|e| positions.contains_key(&e.lane))
        .filter_map(LaneEntry::elapsed_ms)
        .min();

    let mut lanes: Vec<LaneOutcome> = entries
        .iter()
        .map(|entry| {
            let elapsed_ms = entry.elapsed_ms();
            let finish_position = positions.get(&entry.lane).copied();
            if elapsed_ms.is_none() && entry.status.is_ok() && !entry.raw_time.trim().is_empty() {
                tracing::trace!(lane = entry.lane, raw_time = %entry.raw_time, "unparsable time, lane left unranked");
            }
            let gap_ms = finish_position
                .and(elapsed_ms)
                .zip(leader_ms)
                .map(|(ms, leader)| ms - leader);
            LaneOutcome {
                lane: entry.lane,
                status: entry.status,
                elapsed_ms,
                finish_position,
                points: calculator.points(finish_position, custom_points),
                gap_ms,
                time_display: time_codec::format_optional(elapsed_ms),
                gap_display: time_codec::format_delta(gap_ms.and_then(|g| i64::try_from(g).ok())),
                notes: entry.notes.clone(),
            }
        })
        .collect();
    lanes.sort_by_key(|o| o.lane);

    tracing::debug!(
        lanes = lanes.len(),
        ranked = positions.len(),
        custom_points = custom_points.is_some(),
        "evaluated race"
    );

    RaceEvaluation { lanes }
}

/// Per-lane element of the results submission body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSubmission {
    pub lane: u32,
    pub result: LaneResult,
}

/// Body of the results submission (`PUT .../races/{id}/results`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsSubmission(pub Vec<LaneSubmission>);

impl ResultsSubmission {
    pub fn from_race(race: &Race) -> Self {
        Self(
            race.lanes
                .iter()
                .map(|lane| LaneSubmission {
                    lane: lane.lane_number,
                    result: lane.result.clone(),
                })
                .collect(),
        )
    }

    pub fn lanes(&self) -> &[LaneSubmission] {
        &self.0
    }
}

/// Commits an evaluation into the race's lane results.
///
/// Lanes without an outcome in the evaluation keep their stored result.
pub fn publish(race: &mut Race, evaluation: &RaceEvaluation) -> ResultsSubmission {
    let mut updated = 0usize;
    for lane in &mut race.lanes {
        if let Some(outcome) = evaluation.outcome(lane.lane_number) {
            lane.result = outcome.to_lane_result();
            updated += 1;
        }
    }
    tracing::debug!(race = race.order, updated, "published race results");
    ResultsSubmission::from_race(race)
}

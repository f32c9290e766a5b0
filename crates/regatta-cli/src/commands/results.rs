//! Results command for evaluating a race file.
//!
//! This module implements `regatta results` which reads the lanes of one race
//! as entered by the operator and prints standings (human-readable), the
//! evaluation (JSON) or the body of the results submission.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use regatta_core::{
    BoatClassDescriptor, CategoryDescriptor, Lane, LaneEntry, LaneOutcome, LaneStatus,
    PointsTable, Race, RaceEvaluation, evaluate_race, publish,
};
use serde::{Deserialize, Serialize};

use crate::Config;

/// Output format for the results command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Submission,
}

// ========== Race File ==========

/// A race as exported by the result entry form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceFile {
    pub order: u32,

    #[serde(default)]
    pub phase: String,

    #[serde(default)]
    pub distance_meters: Option<u32>,

    #[serde(default)]
    pub category: Option<CategoryDescriptor>,

    #[serde(default)]
    pub boat_class: Option<BoatClassDescriptor>,

    /// Competition-specific points; positions it omits use the default scale.
    #[serde(default)]
    pub points_table: Option<PointsTable>,

    #[serde(default)]
    pub lanes: Vec<LaneFileEntry>,
}

/// One lane row of the entry form.
#[derive(Debug, Clone, Deserialize)]
pub struct LaneFileEntry {
    pub lane: u32,

    #[serde(default)]
    pub status: LaneStatus,

    /// Time as typed by the operator.
    #[serde(default)]
    pub time: String,

    #[serde(default)]
    pub athlete: String,

    #[serde(default)]
    pub club: String,

    #[serde(default)]
    pub notes: Option<String>,
}

impl RaceFile {
    /// Reads and decodes a race file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to decode race file {}", path.display()))
    }

    /// Splits the file into the scheduled race and the operator's entries.
    pub fn into_race(self) -> Result<(Race, Vec<LaneEntry>)> {
        let mut race = Race::new(self.order, self.phase);
        race.distance_meters = self.distance_meters;

        let mut entries = Vec::with_capacity(self.lanes.len());
        for row in self.lanes {
            let lane = Lane::new(row.lane, row.athlete, row.club)
                .with_context(|| format!("invalid lane {}", row.lane))?;
            race.lanes.push(lane);
            entries.push(LaneEntry {
                lane: row.lane,
                status: row.status,
                raw_time: row.time,
                notes: row.notes,
            });
        }
        race.validate().context("invalid race")?;

        Ok((race, entries))
    }
}

// ========== Output ==========

/// Evaluation report for JSON output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsReport<'a> {
    pub race_code: &'a str,
    pub order: u32,
    pub phase: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u32>,
    pub lanes: &'a [LaneOutcome],
}

fn table_row(
    pos: &str,
    lane: &str,
    crew: &str,
    time: &str,
    gap: &str,
    points: &str,
    status: &str,
) -> String {
    let row = format!("{pos:<5}{lane:<6}{crew:<20}{time:>9}{gap:>9}{points:>5}  {status}");
    row.trim_end().to_string()
}

/// Formats standings as a results-sheet table.
pub fn format_standings(race: &Race, race_code: &str, evaluation: &RaceEvaluation) -> String {
    let mut output = String::new();

    let distance = race
        .distance_meters
        .map(|d| format!(", {d} m"))
        .unwrap_or_default();
    let _ = writeln!(
        output,
        "Race {} {race_code} ({}{distance})",
        race.order, race.phase
    );
    let _ = writeln!(
        output,
        "{}",
        table_row("Pos", "Lane", "Crew", "Time", "Gap", "Pts", "Status")
    );

    for outcome in evaluation.standings() {
        let crew = race
            .lane(outcome.lane)
            .map_or("", |l| l.athlete_or_crew.as_str());
        let position = outcome
            .finish_position
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        let gap = if outcome.gap_display.is_empty() {
            String::new()
        } else {
            format!("+{}", outcome.gap_display)
        };
        let status = if outcome.status.is_ok() {
            String::new()
        } else {
            outcome.status.as_str().to_uppercase()
        };
        let _ = writeln!(
            output,
            "{}",
            table_row(
                &position,
                &outcome.lane.to_string(),
                crew,
                &outcome.time_display,
                &gap,
                &outcome.points.to_string(),
                &status,
            )
        );
    }

    output
}

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    race_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let race_file = RaceFile::load(race_path)?;
    let race_code = config
        .race_code
        .generate(race_file.category.as_ref(), race_file.boat_class.as_ref());
    let points_table = race_file.points_table.clone();
    let (mut race, entries) = race_file.into_race()?;

    tracing::debug!(
        race = race.order,
        lanes = entries.len(),
        %race_code,
        "evaluating race"
    );

    let evaluation = evaluate_race(
        &entries,
        &config.points_calculator(),
        points_table.as_ref(),
    );

    match format {
        OutputFormat::Table => {
            write!(writer, "{}", format_standings(&race, &race_code, &evaluation))?;
        }
        OutputFormat::Json => {
            let report = ResultsReport {
                race_code: &race_code,
                order: race.order,
                phase: &race.phase,
                distance_meters: race.distance_meters,
                lanes: &evaluation.lanes,
            };
            writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Submission => {
            let submission = publish(&mut race, &evaluation);
            writeln!(writer, "{}", serde_json::to_string_pretty(&submission)?)?;
        }
    }

    Ok(())
}

//! Competition points per finish position.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Federation default points, index 0 being first place.
pub const FEDERATION_POINTS_SCALE: [u32; 8] = [20, 12, 8, 6, 4, 3, 2, 1];

static FEDERATION_DEFAULT: LazyLock<PointsCalculator> = LazyLock::new(PointsCalculator::default);

/// Mapping from 1-based finish position to points.
///
/// Serializes as a JSON object keyed by position (`{"1": 20, "2": 12}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsTable(BTreeMap<u32, u32>);

impl PointsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a descending scale where `scale[0]` is first place.
    pub fn from_scale(scale: &[u32]) -> Self {
        scale.iter().copied().zip(1u32..).map(|(p, pos)| (pos, p)).collect()
    }

    pub fn insert(&mut self, position: u32, points: u32) -> Option<u32> {
        self.0.insert(position, points)
    }

    pub fn get(&self, position: u32) -> Option<u32> {
        self.0.get(&position).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, u32)> for PointsTable {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolves points using a competition table with a default fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsCalculator {
    default_table: PointsTable,
}

impl Default for PointsCalculator {
    fn default() -> Self {
        Self::new(PointsTable::from_scale(&FEDERATION_POINTS_SCALE))
    }
}

impl PointsCalculator {
    pub const fn new(default_table: PointsTable) -> Self {
        Self { default_table }
    }

    pub const fn default_table(&self) -> &PointsTable {
        &self.default_table
    }

    /// Points for a finish position.
    ///
    /// A competition table entry for the position wins; positions it does
    /// not list fall back to the default table. Missing positions and
    /// positions absent from both tables score 0.
    pub fn points(&self, position: Option<u32>, custom: Option<&PointsTable>) -> u32 {
        let Some(position) = position.filter(|&p| p >= 1) else {
            return 0;
        };
        custom
            .and_then(|table| table.get(position))
            .or_else(|| self.default_table.get(position))
            .unwrap_or(0)
    }
}

/// Points for a finish position against the federation default scale.
pub fn points(position: Option<u32>, custom: Option<&PointsTable>) -> u32 {
    FEDERATION_DEFAULT.points(position, custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale() {
        assert_eq!(points(Some(1), None), 20);
        assert_eq!(points(Some(2), None), 12);
        assert_eq!(points(Some(3), None), 8);
        assert_eq!(points(Some(8), None), 1);
    }

    #[test]
    fn beyond_default_scale_scores_zero() {
        assert_eq!(points(Some(9), None), 0);
        assert_eq!(points(Some(40), None), 0);
    }

    #[test]
    fn missing_or_zero_position_scores_zero() {
        assert_eq!(points(None, None), 0);
        assert_eq!(points(Some(0), None), 0);
    }

    #[test]
    fn custom_entry_overrides_only_its_position() {
        let custom: PointsTable = [(3, 50)].into_iter().collect();
        assert_eq!(points(Some(3), Some(&custom)), 50);
        assert_eq!(points(Some(1), Some(&custom)), 20);
        assert_eq!(points(Some(9), Some(&custom)), 0);
    }

    #[test]
    fn custom_table_can_extend_past_default() {
        let custom: PointsTable = [(9, 1), (10, 1)].into_iter().collect();
        assert_eq!(points(Some(10), Some(&custom)), 1);
    }

    #[test]
    fn configured_default_scale() {
        let calculator = PointsCalculator::new(PointsTable::from_scale(&[10, 5]));
        assert_eq!(calculator.points(Some(1), None), 10);
        assert_eq!(calculator.points(Some(2), None), 5);
        assert_eq!(calculator.points(Some(3), None), 0);
    }

    #[test]
    fn table_deserializes_from_string_keys() {
        let table: PointsTable = serde_json::from_str(r#"{"1": 30, "3": 50}"#).unwrap();
        assert_eq!(table.get(1), Some(30));
        assert_eq!(table.get(2), None);
        assert_eq!(table.get(3), Some(50));
        assert_eq!(table.len(), 2);
    }
}

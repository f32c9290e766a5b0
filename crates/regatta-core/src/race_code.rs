//! Race code generation.
//!
//! The race code is the short identifier printed on start lists and results
//! sheets (`M1X`, `LW2-`, `JLM4X`, `C2X`). It is derived only from the
//! category and the boat class, so the same pair always yields the same code.
//!
//! # Assembly
//!
//! | senior | coastal | code                                           |
//! |--------|---------|------------------------------------------------|
//! | yes    | yes     | `[L]` boat                                     |
//! | yes    | no      | `[L]` gender boat                              |
//! | no     | yes     | abbreviation `[L]` boat                        |
//! | no     | no      | abbreviation `[L]` gender boat, or `L` spliced |
//! |        |         | before a gender suffix the abbreviation has    |
//!
//! `L` marks lightweight boats, either from the boat class weight class or a
//! legacy `L`/`LM`/`LW` prefix on the boat code.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::types::{Gender, WeightClass};

const LIGHTWEIGHT_MARKER: &str = "L";

/// Gender suffixes an abbreviation may already carry, longest first.
const GENDER_SUFFIXES: [&str; 3] = ["Mix", "M", "W"];

static DEFAULT_RULES: LazyLock<RaceCodeRules> = LazyLock::new(RaceCodeRules::default);

/// Category reference data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDescriptor {
    /// Short category name (`SM`, `JW`, `U23`).
    #[serde(default)]
    pub abbreviation: String,

    #[serde(default)]
    pub gender: Gender,

    /// Titles keyed by language code.
    #[serde(default)]
    pub localized_titles: BTreeMap<String, String>,
}

impl CategoryDescriptor {
    pub fn new(abbreviation: impl Into<String>, gender: Gender) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            gender,
            localized_titles: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, language: impl Into<String>, title: impl Into<String>) -> Self {
        self.localized_titles.insert(language.into(), title.into());
        self
    }

    pub fn english_title(&self) -> Option<&str> {
        self.localized_titles.get("en").map(String::as_str)
    }

    /// Whether the category counts as senior under the default rules.
    pub fn is_senior(&self) -> bool {
        DEFAULT_RULES.is_senior(self)
    }
}

/// Boat class reference data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoatClassDescriptor {
    /// Boat code (`1X`, `2-`, `C4X+`, legacy `LW1X`).
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub weight_class: WeightClass,

    /// Names keyed by language code.
    #[serde(default)]
    pub localized_names: BTreeMap<String, String>,
}

impl BoatClassDescriptor {
    pub fn new(code: impl Into<String>, weight_class: WeightClass) -> Self {
        Self {
            code: code.into(),
            weight_class,
            localized_names: BTreeMap::new(),
        }
    }
}

/// Tables that drive race code generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceCodeRules {
    /// Boat code used when the boat class is missing.
    pub default_boat_code: String,

    /// Abbreviations that denote a senior category (compared case-insensitively).
    pub senior_abbreviations: Vec<String>,

    /// Word whose presence in the English title marks a senior category.
    pub senior_title_marker: String,

    /// Boat code prefixes from before weight classes were stored explicitly.
    /// A prefix only matches when a digit follows it.
    pub legacy_lightweight_prefixes: Vec<String>,
}

impl Default for RaceCodeRules {
    fn default() -> Self {
        Self {
            default_boat_code: "1X".to_string(),
            senior_abbreviations: vec!["SM".to_string(), "SW".to_string(), "S".to_string()],
            senior_title_marker: "senior".to_string(),
            legacy_lightweight_prefixes: vec!["LM".to_string(), "LW".to_string(), "L".to_string()],
        }
    }
}

impl RaceCodeRules {
    pub fn is_senior(&self, category: &CategoryDescriptor) -> bool {
        let abbreviation = category.abbreviation.trim();
        if self
            .senior_abbreviations
            .iter()
            .any(|a| a.eq_ignore_ascii_case(abbreviation))
        {
            return true;
        }
        let marker = self.senior_title_marker.to_lowercase();
        !marker.is_empty()
            && category
                .english_title()
                .is_some_and(|title| title.to_lowercase().contains(&marker))
    }

    /// Strips a legacy lightweight prefix, returning the remaining boat code.
    pub fn strip_legacy_prefix<'a>(&self, code: &'a str) -> Option<&'a str> {
        self.legacy_lightweight_prefixes.iter().find_map(|prefix| {
            let head = code.get(..prefix.len())?;
            let rest = code.get(prefix.len()..)?;
            (!prefix.is_empty()
                && head.eq_ignore_ascii_case(prefix)
                && rest.starts_with(|c: char| c.is_ascii_digit()))
            .then_some(rest)
        })
    }

    /// Generates the race code for a category and boat class.
    ///
    /// Missing reference data falls back to the default boat code, an empty
    /// abbreviation and the men's gender prefix.
    pub fn generate(
        &self,
        category: Option<&CategoryDescriptor>,
        boat_class: Option<&BoatClassDescriptor>,
    ) -> String {
        let raw_code = boat_class
            .map(|b| b.code.trim())
            .filter(|code| !code.is_empty())
            .unwrap_or(self.default_boat_code.as_str());

        let (boat_code, legacy_lightweight) = match self.strip_legacy_prefix(raw_code) {
            Some(rest) => (rest, true),
            None => (raw_code, false),
        };

        let is_lightweight = legacy_lightweight
            || boat_class.is_some_and(|b| b.weight_class == WeightClass::Lightweight);
        let is_coastal = boat_code.starts_with(['C', 'c']);
        let is_senior = category.is_some_and(|c| self.is_senior(c));
        let abbreviation = category.map_or("", |c| c.abbreviation.trim());
        let gender = category.map_or(Gender::Men, |c| c.gender).code_prefix();
        let lw = if is_lightweight { LIGHTWEIGHT_MARKER } else { "" };

        let code = match (is_senior, is_coastal) {
            (true, true) => format!("{lw}{boat_code}"),
            (true, false) => format!("{lw}{gender}{boat_code}"),
            (false, true) => format!("{abbreviation}{lw}{boat_code}"),
            (false, false) => match split_gender_suffix(abbreviation) {
                Some((stem, suffix)) => format!("{stem}{lw}{suffix}{boat_code}"),
                None => format!("{abbreviation}{lw}{gender}{boat_code}"),
            },
        };

        tracing::trace!(
            %code,
            is_senior,
            is_coastal,
            is_lightweight,
            legacy_lightweight,
            "generated race code"
        );
        code
    }
}

/// Splits an abbreviation like `JW` or `U23Mix` into stem and gender suffix.
fn split_gender_suffix(abbreviation: &str) -> Option<(&str, &str)> {
    GENDER_SUFFIXES.iter().find_map(|&suffix| {
        abbreviation
            .strip_suffix(suffix)
            .map(|stem| (stem, suffix))
    })
}

/// Generates a race code with the default rules.
pub fn generate(
    category: Option<&CategoryDescriptor>,
    boat_class: Option<&BoatClassDescriptor>,
) -> String {
    DEFAULT_RULES.generate(category, boat_class)
}

//! Code command for printing the race code of a category and boat class.

use std::io::Write;

use anyhow::Result;
use regatta_core::{BoatClassDescriptor, CategoryDescriptor, Gender, RaceCodeRules, WeightClass};

/// Arguments describing the event.
#[derive(Debug, Clone)]
pub struct CodeArgs {
    pub abbreviation: String,
    pub gender: Gender,
    pub title: Option<String>,
    pub boat: Option<String>,
    pub weight: WeightClass,
}

pub fn run<W: Write>(writer: &mut W, rules: &RaceCodeRules, args: &CodeArgs) -> Result<()> {
    let mut category = CategoryDescriptor::new(args.abbreviation.clone(), args.gender);
    if let Some(title) = &args.title {
        category = category.with_title("en", title.clone());
    }

    // An empty code falls back to the configured default boat code.
    let boat_class = BoatClassDescriptor::new(args.boat.clone().unwrap_or_default(), args.weight);

    let code = rules.generate(Some(&category), Some(&boat_class));
    writeln!(writer, "{code}")?;
    Ok(())
}

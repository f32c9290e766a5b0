//! Time command for checking operator time entry.

use std::io::Write;

use anyhow::Result;
use regatta_core::time_codec;

/// Prints elapsed milliseconds, or `-` when the text is not a valid time.
pub fn parse<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    match time_codec::parse(text) {
        Some(ms) => writeln!(writer, "{ms}")?,
        None => {
            tracing::debug!(text, "entry is not a valid time");
            writeln!(writer, "-")?;
        }
    }
    Ok(())
}

pub fn format<W: Write>(writer: &mut W, ms: u64) -> Result<()> {
    writeln!(writer, "{}", time_codec::format(ms))?;
    Ok(())
}

pub fn auto<W: Write>(writer: &mut W, raw: &str) -> Result<()> {
    writeln!(writer, "{}", time_codec::auto_format(raw))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut output = Vec::new();
        f(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_prints_milliseconds() {
        assert_eq!(run_to_string(|w| parse(w, "2:05.30")), "125300\n");
    }

    #[test]
    fn parse_prints_placeholder_for_invalid_time() {
        assert_eq!(run_to_string(|w| parse(w, "1:61.00")), "-\n");
    }

    #[test]
    fn format_prints_display_form() {
        assert_eq!(run_to_string(|w| format(w, 45_100)), "45.10\n");
    }

    #[test]
    fn auto_corrects_shorthand() {
        assert_eq!(run_to_string(|w| auto(w, "22360")), "02:23.60\n");
    }
}

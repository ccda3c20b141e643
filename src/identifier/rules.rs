use std::sync::OnceLock;

use regex::Regex;

use super::{Group, SampleType};

/// ASCII numeric token right after a literal `t`
const TIME_PATTERN: &str = r"t([0-9]+\.?[0-9]*)";

/// Two ASCII digits followed by one of the four treatment letters
const SAMPLE_GROUP_PATTERN: &str = r"([0-9]{2})([A-D])";

static TIME_RULE: OnceLock<Option<Regex>> = OnceLock::new();
static SAMPLE_GROUP_RULE: OnceLock<Option<Regex>> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

/// Extract the incubation time (days) from the first `t<number>` token
pub fn extract_time(raw: &str) -> Option<f64> {
    let rule = compiled(&TIME_RULE, TIME_PATTERN)?;
    let captures = rule.captures(raw)?;
    captures.get(1)?.as_str().parse::<f64>().ok()
}

/// Classify the sample as disk or dust by case-insensitive substring
pub fn extract_sample_type(raw: &str) -> Option<SampleType> {
    let lowered = raw.to_lowercase();
    if lowered.contains("disk") {
        Some(SampleType::Disk)
    } else if lowered.contains("dust") {
        Some(SampleType::Dust)
    } else {
        None
    }
}

/// Extract the two-digit sample number and its treatment group
pub fn extract_sample_group(raw: &str) -> Option<(String, Group)> {
    let rule = compiled(&SAMPLE_GROUP_RULE, SAMPLE_GROUP_PATTERN)?;
    let captures = rule.captures(raw)?;
    let number = captures.get(1)?.as_str().to_string();
    let letter = captures.get(2)?.as_str().chars().next()?;
    Some((number, Group::from_letter(letter)))
}

/// Blank and control rows are excluded before any parsing
pub fn is_blank(raw: &str) -> bool {
    raw.to_lowercase().contains("blank")
}

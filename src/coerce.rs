//! Normalization of SWAPI's loosely typed string fields.
//!
//! Every function is total over `Option<&str>`: `None` stands for a value missing from
//! the payload and always maps to `None` (or to the documented default). Sentinel
//! filters are applied explicitly at each call site so a field only treats the
//! sentinels it is known to carry as absent.

use crate::domain::{Designation, Duration, Period};

const LIVE_FOOD_TANKS: &str = "Live food tanks";

pub fn unknown(value: Option<&str>) -> Option<&str> {
    value.filter(|v| *v != "unknown")
}

pub fn none(value: Option<&str>) -> Option<&str> {
    value.filter(|v| *v != "none")
}

pub fn not_applicable(value: Option<&str>) -> Option<&str> {
    value.filter(|v| *v != "n/a")
}

pub fn indefinite(value: Option<&str>) -> Option<&str> {
    value.filter(|v| *v != "indefinite")
}

/// Parses the leading integer of `value`, ignoring `,` digit grouping.
/// `"1,358"` is 1358, `"1000km"` is 1000, `"abc"` and `""` are `None`.
/// Grouping commas are dropped before parsing, so `"1,600"` is 1600 rather than
/// stopping at the comma and yielding 1.
pub fn to_int(value: Option<&str>) -> Option<i64> {
    let cleaned = strip_grouping(value?);
    let prefix = numeric_prefix(&cleaned, false);
    prefix.parse().ok()
}

/// Like [`to_int`] but keeps a fractional part: `"1.5"` is 1.5, `"0.8 standard"` is 0.8.
/// Grouping commas are dropped the same way: `"1,600.5"` is 1600.5.
pub fn to_float(value: Option<&str>) -> Option<f64> {
    let cleaned = strip_grouping(value?);
    let prefix = numeric_prefix(&cleaned, true);
    prefix.parse().ok()
}

/// Splits a `", "` separated value. `n/a` and `none` mean "nothing", which is an empty
/// list; a missing or empty value is `None`.
pub fn to_list(value: Option<&str>) -> Option<Vec<String>> {
    match value? {
        "" => None,
        "n/a" | "none" => Some(Vec::new()),
        v => Some(v.split(", ").map(str::to_string).collect()),
    }
}

/// Parses `"<integer> <unit>"` supply durations. Unrecognised units fall back to days.
pub fn to_consumables(value: Option<&str>) -> Option<Duration> {
    let value = value?;
    if matches!(value, "unknown" | "none" | LIVE_FOOD_TANKS) {
        return None;
    }
    let mut tokens = value.split(' ');
    let duration = to_int(tokens.next())?;
    let period = tokens
        .next()
        .and_then(|unit| unit.parse::<Period>().ok())
        .unwrap_or(Period::Days);
    Some(Duration { duration, period })
}

/// Fixed two-way rule: `reptilian` or SENTIENT for everything else.
pub fn to_designation(value: Option<&str>) -> Designation {
    match value {
        Some("reptilian") => Designation::Reptilian,
        _ => Designation::Sentient,
    }
}

fn strip_grouping(value: &str) -> String {
    value.trim().chars().filter(|ch| *ch != ',').collect()
}

fn numeric_prefix(value: &str, allow_fraction: bool) -> &str {
    let mut end = 0;
    let mut seen_dot = false;
    for (idx, ch) in value.char_indices() {
        let accepted = match ch {
            '-' | '+' => idx == 0,
            '0'..='9' => true,
            '.' if allow_fraction && !seen_dot => {
                seen_dot = true;
                true
            }
            _ => false,
        };
        if !accepted {
            break;
        }
        end = idx + ch.len_utf8();
    }
    &value[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_only_match_their_own_literal() {
        assert_eq!(unknown(Some("unknown")), None);
        assert_eq!(unknown(Some("none")), Some("none"));
        assert_eq!(none(Some("none")), None);
        assert_eq!(not_applicable(Some("n/a")), None);
        assert_eq!(indefinite(Some("indefinite")), None);
        assert_eq!(indefinite(Some("unknown")), Some("unknown"));
    }

    #[test]
    fn numbers_never_default_to_zero() {
        assert_eq!(to_int(None), None);
        assert_eq!(to_int(Some("")), None);
        assert_eq!(to_int(unknown(Some("unknown"))), None);
        assert_eq!(to_float(Some("abc")), None);
        assert_eq!(to_int(Some("172")), Some(172));
        assert_eq!(to_int(Some("1,000,000")), Some(1_000_000));
        assert_eq!(to_int(Some("1000km")), Some(1000));
        assert_eq!(to_int(Some("2.5")), Some(2));
        assert_eq!(to_float(Some("1,358")), Some(1358.0));
        assert_eq!(to_int(Some("1,600")), Some(1600));
        assert_eq!(to_float(Some("1,600.5")), Some(1600.5));
        assert_eq!(to_float(Some("77.5")), Some(77.5));
    }

    #[test]
    fn list_distinguishes_empty_from_absent() {
        assert_eq!(to_list(Some("n/a")), Some(vec![]));
        assert_eq!(to_list(Some("none")), Some(vec![]));
        assert_eq!(to_list(None), None);
        assert_eq!(
            to_list(Some("a, b, c")),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(to_list(unknown(Some("unknown"))), None);
    }

    #[test]
    fn consumables_sentinels_are_absent() {
        assert_eq!(to_consumables(Some("unknown")), None);
        assert_eq!(to_consumables(Some("none")), None);
        assert_eq!(to_consumables(Some("Live food tanks")), None);
        assert_eq!(to_consumables(None), None);
    }

    #[test]
    fn consumables_parse_duration_and_period() {
        assert_eq!(
            to_consumables(Some("2 days")),
            Some(Duration {
                duration: 2,
                period: Period::Days
            })
        );
        assert_eq!(
            to_consumables(Some("1 week")),
            Some(Duration {
                duration: 1,
                period: Period::Weeks
            })
        );
        assert_eq!(
            to_consumables(Some("3 fortnights")),
            Some(Duration {
                duration: 3,
                period: Period::Days
            })
        );
        assert_eq!(
            to_consumables(Some("6 years")),
            Some(Duration {
                duration: 6,
                period: Period::Years
            })
        );
    }

    #[test]
    fn designation_collapses_everything_but_reptilian() {
        assert_eq!(to_designation(Some("reptilian")), Designation::Reptilian);
        assert_eq!(to_designation(Some("mammal")), Designation::Sentient);
        assert_eq!(to_designation(Some("unknown")), Designation::Sentient);
        assert_eq!(to_designation(None), Designation::Sentient);
    }
}

//! Format rules applied to individual attribute values.
//!
//! All rules are pure. Values are trimmed before checking unless noted.

use std::sync::LazyLock;

use biosample_standards::LocationVocabulary;
use regex::Regex;

/// Separates the main location token from details, e.g. `Canada: Vancouver`.
pub const LOCATION_SEPARATOR: char = ':';

/// Values submitters use to say "no value"; not worth an ontology lookup.
pub const MISSING_VALUE_SENTINELS: &[&str] = &[
    "not applicable",
    "not_applicable",
    "not collected",
    "missing",
    "null",
    "?",
    "-",
    "na",
    "n/a",
    "unknown",
    "none provided",
];

/// `DD-Mon-YYYY`, `Mon-YYYY` or `YYYY`.
static DAY_MONTH_YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\d{2}-(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)-\d{4}|(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)-\d{4}|\d{4})$",
    )
    .expect("Invalid day-month-year regex")
});

/// `YYYY-MM`, `YYYY-MM-DD` or `YYYY-MM-DDThh:mm:ss[.mmm]`.
static ISO8601_TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\d{4}-(?:0[1-9]|1[0-2])(?:-(?:0[1-9]|[12]\d|3[01])(?:T(?:[01]\d|2[0-3]):[0-5]\d:[0-5]\d(?:\.\d{3})?)?)?$",
    )
    .expect("Invalid ISO 8601 timestamp regex")
});

/// Decimal degrees with hemisphere markers, e.g. `38.98 N 77.11 W`.
static COORDINATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{0,3}(?:\.\d+)? ?[NS] \d{0,3}(?:\.\d+)? ?[EW]$")
        .expect("Invalid coordinate regex")
});

pub fn is_filled_in(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Case-insensitive membership in [`MISSING_VALUE_SENTINELS`].
pub fn is_missing_value(value: &str) -> bool {
    let value = value.trim();
    MISSING_VALUE_SENTINELS
        .iter()
        .any(|sentinel| value.eq_ignore_ascii_case(sentinel))
}

pub fn is_boolean(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

/// Base-10 integer with an optional sign. Fractions and exponents are rejected.
pub fn is_integer(value: &str) -> bool {
    value.trim().parse::<i64>().is_ok()
}

/// The allowed value equal to `value` ignoring case, in its declared casing.
pub fn value_set_match<'a>(value: &str, allowed_values: &'a [String]) -> Option<&'a str> {
    let value = value.trim();
    allowed_values
        .iter()
        .find(|allowed| allowed.trim().to_lowercase() == value.to_lowercase())
        .map(String::as_str)
}

pub fn is_timestamp(value: &str) -> bool {
    let value = value.trim();
    DAY_MONTH_YEAR_REGEX.is_match(value) || ISO8601_TIMESTAMP_REGEX.is_match(value)
}

pub fn is_coordinate(value: &str) -> bool {
    COORDINATE_REGEX.is_match(value.trim())
}

/// The main location token (text before the first colon) must be in the
/// vocabulary. Comparison is exact: case-sensitive and untrimmed.
pub fn is_geographic_location(value: &str, vocabulary: &LocationVocabulary) -> bool {
    let main = match value.split_once(LOCATION_SEPARATOR) {
        Some((main, _)) => main,
        None => value,
    };
    vocabulary.contains(main)
}

/// Prepare a value for an ontology lookup.
///
/// Square brackets are removed, then everything up to and including the
/// first colon is dropped: `[UBERON:0000948]` becomes `0000948`.
pub fn normalize_term(value: &str) -> String {
    let stripped: String = value.chars().filter(|c| !matches!(c, '[' | ']')).collect();
    match stripped.split_once(':') {
        Some((_, rest)) => rest.to_string(),
        None => stripped,
    }
}

use std::fmt;

use chrono::{NaiveDate, NaiveTime};

pub const USER_DATE_FORMAT: &str = "%Y-%m-%d";
pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

#[derive(Debug)]
pub struct DateFormatError(pub String);

impl fmt::Display for DateFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a valid YYYY-MM-DD date: {}", self.0)
    }
}

impl std::error::Error for DateFormatError {}

/// True iff the input parses strictly as a YYYY-MM-DD calendar date.
/// Rejects impossible dates such as month 13 or Feb 30.
pub fn is_valid_date(input: &str) -> bool {
    NaiveDate::parse_from_str(input, USER_DATE_FORMAT).is_ok()
}

/// Re-emit a user-facing YYYY-MM-DD date in the EXIF textual form with a
/// zeroed time-of-day. Time is never reconstructed from input; only the
/// date portion round-trips.
pub fn to_exif_date(input: &str) -> Result<String, DateFormatError> {
    let date = NaiveDate::parse_from_str(input, USER_DATE_FORMAT)
        .map_err(|_| DateFormatError(input.to_string()))?;

    Ok(date.and_time(NaiveTime::MIN).format(EXIF_DATE_FORMAT).to_string())
}

/// Map an EXIF `YYYY:MM:DD HH:MM:SS` value back to the user-facing form:
/// the first ten characters with colons turned into dashes. Values that are
/// too short or do not denote a calendar date yield `None`.
pub fn from_exif_date(value: &str) -> Option<String> {
    let date_part = value.get(..10)?;
    let user_form = date_part.replace(':', "-");
    NaiveDate::parse_from_str(&user_form, USER_DATE_FORMAT).ok()?;
    Some(user_form)
}

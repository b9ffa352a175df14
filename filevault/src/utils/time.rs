use chrono::{DateTime, ParseError, Utc};

/// Returns the current UTC time as a string formatted according to RFC 3339.
///
/// Every `created_at` column and ledger timestamp uses this format.
/// Example: "2025-09-13T03:49:58.123456789Z"
pub fn now_as_rfc3339_string() -> String {
    Utc::now().to_rfc3339()
}

/// Parses an RFC 3339 formatted string back into a `DateTime<Utc>` object.
///
/// # Errors
/// Returns a `ParseError` if the string is not a valid RFC 3339 timestamp.
pub fn parse_rfc3339_string(s: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

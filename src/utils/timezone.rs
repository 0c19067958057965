use chrono_tz::Tz;
use thiserror::Error;

/// Error types for timezone operations
#[derive(Debug, Error)]
pub enum TimezoneError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Parse an IANA timezone name such as `Europe/Paris`
pub fn parse_timezone(tz_str: &str) -> Result<Tz, TimezoneError> {
    tz_str
        .trim()
        .parse()
        .map_err(|_| TimezoneError::InvalidTimezone(tz_str.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("UTC").unwrap(), Tz::UTC);
        assert_eq!(parse_timezone("Europe/Paris").unwrap(), chrono_tz::Europe::Paris);
        assert!(parse_timezone("Invalid/Timezone").is_err());
    }
}

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::config::SportsConfig;
use crate::error::ProviderError;

pub fn parse_timezone(name: &str) -> Result<Tz, ProviderError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ProviderError::InvalidTimezone(name.to_string()))
}

/// `YYYY-MM-DD` for `now` as seen in `timezone`
pub fn local_date(timezone: &str, now: DateTime<Utc>) -> Result<String, ProviderError> {
    let tz = parse_timezone(timezone)?;
    Ok(now.with_timezone(&tz).format("%Y-%m-%d").to_string())
}

/// The date the providers are queried for: the override when set, otherwise
/// today in the configured timezone
pub fn slate_date(config: &SportsConfig, now: DateTime<Utc>) -> Result<String, ProviderError> {
    if let Some(date) = config
        .date_override
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        return Ok(date.to_string());
    }
    local_date(&config.timezone, now)
}

/// ESPN scoreboards take `YYYYMMDD`
pub fn compact_date(iso_date: &str) -> String {
    iso_date.chars().filter(char::is_ascii_digit).collect()
}

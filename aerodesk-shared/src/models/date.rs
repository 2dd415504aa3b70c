use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// A date held in a draft field.
///
/// Editing records arrive with dates as loose JSON (strings, epoch
/// milliseconds). Anything that cannot be read as a date becomes `Invalid`
/// so the form can still render the field and flag it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateValue {
    Valid(DateTime<Utc>),
    Invalid,
}

impl DateValue {
    /// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Self::Valid(dt.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self::Valid(Utc.from_utc_datetime(&naive)))
            .unwrap_or(Self::Invalid)
    }

    /// Milliseconds since the Unix epoch, the way browser dates serialize.
    pub fn from_epoch_millis(millis: f64) -> Self {
        if !millis.is_finite() || millis.fract() != 0.0 {
            return Self::Invalid;
        }

        DateTime::<Utc>::from_timestamp_millis(millis as i64)
            .map(Self::Valid)
            .unwrap_or(Self::Invalid)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(dt) => Some(*dt),
            Self::Invalid => None,
        }
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Valid(dt)
    }
}

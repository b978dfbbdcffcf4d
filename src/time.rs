//! Departure times and the timestamps exchanged with the server.

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Timelike, Utc,
};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// The format used when sending a ride's time to the server.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

const EARLIEST: u32 = 9 * 60;
const LATEST: u32 = 18 * 60;

/// A time of day, as entered on the ride creation form.
///
/// Rides may only depart between 09:00 and 18:00, inclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DepartureTime(NaiveTime);

impl DepartureTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            TimeError::Malformed(format!("{:02}:{:02}", hour, minute))
        })?;

        let minute_of_day = hour * 60 + minute;
        if minute_of_day < EARLIEST || minute_of_day > LATEST {
            return Err(TimeError::OutOfRange(DepartureTime(time)));
        }

        Ok(DepartureTime(time))
    }

    /// Parse a bare `HH:MM` string.
    pub fn parse(text: &str) -> Result<Self, TimeError> {
        let text = text.trim();
        let malformed = || TimeError::Malformed(text.to_string());

        let (hours, minutes) = text.split_once(':').ok_or_else(malformed)?;
        if hours.is_empty()
            || hours.len() > 2
            || minutes.len() != 2
            || !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let hours = hours.parse().map_err(|_| malformed())?;
        let minutes = minutes.parse().map_err(|_| malformed())?;

        DepartureTime::new(hours, minutes)
    }

    pub fn hour(self) -> u32 { self.0.hour() }

    pub fn minute(self) -> u32 { self.0.minute() }

    /// Combine this time with a calendar date and a fixed UTC offset.
    pub fn on(
        self,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> DateTime<FixedOffset> {
        let local = date.and_time(self.0);
        let shift = chrono::Duration::seconds(i64::from(offset.local_minus_utc()));
        let utc = local - shift;

        Utc.from_utc_datetime(&utc).with_timezone(&offset)
    }

    /// Combine this time with today's local date, using the local UTC offset
    /// as it is right now.
    ///
    /// The offset is sampled once, so a departure on the far side of a
    /// daylight saving transition keeps today's offset.
    pub fn today(self) -> DateTime<FixedOffset> {
        let now = Local::now();
        self.on(now.date_naive(), *now.offset())
    }
}

impl Default for DepartureTime {
    fn default() -> Self {
        DepartureTime(NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default())
    }
}

impl FromStr for DepartureTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { DepartureTime::parse(s) }
}

impl Display for DepartureTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Errors from validating a [`DepartureTime`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeError {
    #[error("\"{0}\" is not a valid HH:MM time")]
    Malformed(String),
    #[error("Rides must depart between 09:00 and 18:00, not {0}")]
    OutOfRange(DepartureTime),
}

/// Render a timestamp in the wire format, `YYYY-MM-DDTHH:MM:SS±HH:MM`.
pub fn format_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp received from the server.
///
/// The server stores times as naive UTC, so a timestamp without an offset is
/// read as UTC.
pub fn parse_timestamp(
    text: &str,
) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(time) => Ok(time),
        Err(rfc3339_error) => {
            match NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
                Ok(naive) => Ok(Utc.from_utc_datetime(&naive).into()),
                Err(_) => Err(rfc3339_error),
            }
        },
    }
}

/// Format a timestamp as `HH:MM` in the viewer's timezone.
pub fn clock_time<Tz>(time: &DateTime<FixedOffset>, viewer: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.with_timezone(viewer).format("%H:%M").to_string()
}

/// `serde` glue for ride timestamps.
pub(crate) mod timestamp {
    use chrono::{DateTime, FixedOffset};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        time: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(time))
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_timestamp(&text).map_err(|e| {
            D::Error::custom(format!("invalid timestamp \"{}\": {}", text, e))
        })
    }
}

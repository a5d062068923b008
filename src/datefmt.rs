use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike as _, FixedOffset, Offset as _, SecondsFormat, Timelike as _, Utc};

use crate::error::{BoardError, BoardResult};

pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "iso")]
    Iso,
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Self::EsEs => "es-ES",
            Self::EnUs => "en-US",
            Self::Iso => "iso",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "es-es" | "es" => Ok(Self::EsEs),
            "en-us" | "en" => Ok(Self::EnUs),
            "iso" | "rfc3339" => Ok(Self::Iso),
            _ => Err(BoardError::config(format!("unsupported locale '{s}'"))),
        }
    }
}

/// Wall-clock formatting of anchor timestamps.
#[derive(Clone, Copy, Debug)]
pub struct DateFormatter {
    locale: Locale,
    offset: FixedOffset,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            offset: Utc.fix(),
        }
    }
}

impl DateFormatter {
    pub fn new(locale: Locale, utc_offset_minutes: i32) -> BoardResult<Self> {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                BoardError::config(format!(
                    "utc offset of {utc_offset_minutes} minutes is out of range"
                ))
            })?;
        Ok(Self { locale, offset })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn format(&self, unix_seconds: i64) -> String {
        let Some(utc_dt) = DateTime::from_timestamp(unix_seconds, 0) else {
            return INVALID_DATE.to_string();
        };
        let dt = utc_dt.with_timezone(&self.offset);

        match self.locale {
            Locale::EsEs => format!(
                "{}/{}/{}, {}:{:02}:{:02}",
                dt.day(),
                dt.month(),
                dt.year(),
                dt.hour(),
                dt.minute(),
                dt.second()
            ),
            Locale::EnUs => {
                let (pm, hour12) = dt.hour12();
                format!(
                    "{}/{}/{}, {}:{:02}:{:02} {}",
                    dt.month(),
                    dt.day(),
                    dt.year(),
                    hour12,
                    dt.minute(),
                    dt.second(),
                    if pm { "PM" } else { "AM" }
                )
            }
            Locale::Iso => dt.to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(locale: Locale, offset_min: i32, ts: i64) -> String {
        DateFormatter::new(locale, offset_min).unwrap().format(ts)
    }

    #[test]
    fn epoch_in_each_locale() {
        assert_eq!(fmt(Locale::EsEs, 0, 0), "1/1/1970, 0:00:00");
        assert_eq!(fmt(Locale::EnUs, 0, 0), "1/1/1970, 12:00:00 AM");
        assert_eq!(fmt(Locale::Iso, 0, 0), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn offset_shifts_wall_clock() {
        // Madrid in winter.
        assert_eq!(fmt(Locale::EsEs, 60, 0), "1/1/1970, 1:00:00");
        assert_eq!(fmt(Locale::EsEs, -300, 0), "31/12/1969, 19:00:00");
        assert_eq!(fmt(Locale::Iso, 330, 0), "1970-01-01T05:30:00+05:30");
    }

    #[test]
    fn afternoon_in_en_us() {
        // 2024-11-05 15:04:05 UTC
        assert_eq!(fmt(Locale::EnUs, 0, 1_730_819_045), "11/5/2024, 3:04:05 PM");
        assert_eq!(fmt(Locale::EsEs, 0, 1_730_819_045), "5/11/2024, 15:04:05");
    }

    #[test]
    fn unrepresentable_timestamp_is_invalid_date() {
        assert_eq!(fmt(Locale::EsEs, 0, i64::MAX), INVALID_DATE);
    }

    #[test]
    fn rejects_out_of_range_offset() {
        assert!(DateFormatter::new(Locale::EsEs, 24 * 60).is_err());
        assert!(DateFormatter::new(Locale::EsEs, i32::MAX).is_err());
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("es-ES".parse::<Locale>().unwrap(), Locale::EsEs);
        assert_eq!("en_us".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!("ISO".parse::<Locale>().unwrap(), Locale::Iso);
        assert!("fr-FR".parse::<Locale>().is_err());
    }
}

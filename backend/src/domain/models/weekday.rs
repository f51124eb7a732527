//! Domain model for the weekday a member works remotely.
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::business_days::locale_day_name;

/// One of the five business weekdays.
///
/// A member with a remote weekday is exempt from paying whenever their turn
/// falls on that weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteWeekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl RemoteWeekday {
    pub const ALL: [RemoteWeekday; 5] = [
        RemoteWeekday::Monday,
        RemoteWeekday::Tuesday,
        RemoteWeekday::Wednesday,
        RemoteWeekday::Thursday,
        RemoteWeekday::Friday,
    ];

    /// Map a chrono weekday, returning None for Saturday and Sunday
    pub fn from_chrono(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(RemoteWeekday::Monday),
            Weekday::Tue => Some(RemoteWeekday::Tuesday),
            Weekday::Wed => Some(RemoteWeekday::Wednesday),
            Weekday::Thu => Some(RemoteWeekday::Thursday),
            Weekday::Fri => Some(RemoteWeekday::Friday),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    /// Business weekday of a calendar date, None on weekends
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        Self::from_chrono(date.weekday())
    }

    pub fn to_chrono(self) -> Weekday {
        match self {
            RemoteWeekday::Monday => Weekday::Mon,
            RemoteWeekday::Tuesday => Weekday::Tue,
            RemoteWeekday::Wednesday => Weekday::Wed,
            RemoteWeekday::Thursday => Weekday::Thu,
            RemoteWeekday::Friday => Weekday::Fri,
        }
    }

    /// Numeric code used by the entry form: 1 = Monday .. 5 = Friday
    pub fn code(self) -> u8 {
        self.to_chrono().number_from_monday() as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=5 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    /// Full day name in the group's locale, e.g. "segunda-feira"
    pub fn locale_name(self) -> &'static str {
        locale_day_name(self.to_chrono())
    }

    /// Short label shown next to a member in the queue, e.g. "Segunda"
    pub fn short_label(self) -> &'static str {
        match self {
            RemoteWeekday::Monday => "Segunda",
            RemoteWeekday::Tuesday => "Terça",
            RemoteWeekday::Wednesday => "Quarta",
            RemoteWeekday::Thursday => "Quinta",
            RemoteWeekday::Friday => "Sexta",
        }
    }

    fn english_name(self) -> &'static str {
        match self {
            RemoteWeekday::Monday => "monday",
            RemoteWeekday::Tuesday => "tuesday",
            RemoteWeekday::Wednesday => "wednesday",
            RemoteWeekday::Thursday => "thursday",
            RemoteWeekday::Friday => "friday",
        }
    }
}

impl fmt::Display for RemoteWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.english_name())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown remote weekday: {0}")]
pub struct ParseRemoteWeekdayError(pub String);

impl FromStr for RemoteWeekday {
    type Err = ParseRemoteWeekdayError;

    /// Accepts the English name, the locale name or the numeric code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();

        if let Ok(code) = value.parse::<u8>() {
            return Self::from_code(code).ok_or_else(|| ParseRemoteWeekdayError(s.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|day| day.english_name() == value || day.locale_name() == value)
            .ok_or_else(|| ParseRemoteWeekdayError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_date_skips_weekends() {
        let monday = NaiveDate::from_ymd_opt(2023, 10, 2).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2023, 10, 7).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2023, 10, 8).unwrap();

        assert_eq!(RemoteWeekday::from_date(monday), Some(RemoteWeekday::Monday));
        assert_eq!(RemoteWeekday::from_date(saturday), None);
        assert_eq!(RemoteWeekday::from_date(sunday), None);
    }

    #[test]
    fn test_codes_match_form_values() {
        assert_eq!(RemoteWeekday::Monday.code(), 1);
        assert_eq!(RemoteWeekday::Friday.code(), 5);
        assert_eq!(RemoteWeekday::from_code(3), Some(RemoteWeekday::Wednesday));
        assert_eq!(RemoteWeekday::from_code(0), None);
        assert_eq!(RemoteWeekday::from_code(6), None);
    }

    #[test]
    fn test_locale_names() {
        assert_eq!(RemoteWeekday::Monday.locale_name(), "segunda-feira");
        assert_eq!(RemoteWeekday::Tuesday.locale_name(), "terça-feira");
        assert_eq!(RemoteWeekday::Friday.locale_name(), "sexta-feira");
        assert_eq!(RemoteWeekday::Thursday.short_label(), "Quinta");
    }

    #[test]
    fn test_parse_accepts_every_spelling() {
        assert_eq!("monday".parse::<RemoteWeekday>(), Ok(RemoteWeekday::Monday));
        assert_eq!(" Quarta-Feira ".parse::<RemoteWeekday>(), Ok(RemoteWeekday::Wednesday));
        assert_eq!("5".parse::<RemoteWeekday>(), Ok(RemoteWeekday::Friday));
        assert!("saturday".parse::<RemoteWeekday>().is_err());
        assert!("7".parse::<RemoteWeekday>().is_err());
    }
}

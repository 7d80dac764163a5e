use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A half-hour slot start time within the operating day.
/// Identity is the clock value; ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u16);

impl Slot {
    /// Builds a slot from minutes since midnight. Grid membership is not
    /// checked here; that is `SlotCalendar`'s job.
    pub const fn from_minutes(minutes: u16) -> Self {
        Slot(minutes)
    }

    pub const fn minutes_from_midnight(self) -> u16 {
        self.0
    }

    /// Parses a strict `"HH:MM"` label (two digits each, valid clock time).
    pub fn parse(label: &str) -> Option<Self> {
        let (h, m) = label.split_once(':')?;
        if h.len() != 2 || m.len() != 2 {
            return None;
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let h: u16 = h.parse().ok()?;
        let m: u16 = m.parse().ok()?;
        if h > 23 || m > 59 {
            return None;
        }
        Some(Slot(h * 60 + m))
    }

    /// The slot's start as a time-of-day. `None` only for slots built from
    /// out-of-day minute values, which the calendar rejects anyway.
    pub fn start_time(self) -> Option<NaiveTime> {
        NaiveTime::from_num_seconds_from_midnight_opt(u32::from(self.0) * 60, 0)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Slot::parse(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid slot label '{label}'")))
    }
}

/// A bookable court. The enumeration is fixed; wire keys are `"1"`/`"2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Court {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl Court {
    pub const ALL: [Court; 2] = [Court::One, Court::Two];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "1" => Some(Court::One),
            "2" => Some(Court::Two),
            _ => None,
        }
    }

    /// The wire key used in API payloads.
    pub const fn key(self) -> &'static str {
        match self {
            Court::One => "1",
            Court::Two => "2",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Court::One => "Court 1",
            Court::Two => "Court 2",
        }
    }
}

impl fmt::Display for Court {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A calendar date a booking targets, parsed strictly as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotDate(pub NaiveDate);

impl SlotDate {
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(SlotDate)
    }
}

impl fmt::Display for SlotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

//! Day and hour selection for snapshot pages.
//!
//! The camera archive is addressed by a day directory (`day0` for today,
//! `day1` for yesterday) and a two-digit hour. Human-readable timeslot
//! labels map to hours through a single table.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::LocatorError;

/// Which day's archive to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaySelector {
    /// The current day (`day0`).
    Today,
    /// The previous day (`day1`).
    Yesterday,
}

impl DaySelector {
    /// Directory name used in snapshot URLs.
    pub fn path_segment(&self) -> &'static str {
        match self {
            DaySelector::Today => "day0",
            DaySelector::Yesterday => "day1",
        }
    }
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySelector::Today => f.write_str("today"),
            DaySelector::Yesterday => f.write_str("yesterday"),
        }
    }
}

impl FromStr for DaySelector {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "today" | "day0" => Ok(DaySelector::Today),
            "yesterday" | "day1" => Ok(DaySelector::Yesterday),
            _ => Err(LocatorError::UnknownDay(s.to_string())),
        }
    }
}

/// An hourly snapshot slot during park opening hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "8am")]
    Am8,
    #[serde(rename = "9am")]
    Am9,
    #[serde(rename = "10am")]
    Am10,
    #[serde(rename = "11am")]
    Am11,
    #[serde(rename = "12pm")]
    Pm12,
    #[serde(rename = "1pm")]
    Pm1,
    #[serde(rename = "2pm")]
    Pm2,
    #[serde(rename = "3pm")]
    Pm3,
    #[serde(rename = "4pm")]
    Pm4,
    #[serde(rename = "5pm")]
    Pm5,
}

/// Label and path hour for every slot, in chronological order.
const SLOT_TABLE: [(TimeSlot, &str, &str); 10] = [
    (TimeSlot::Am8, "8am", "08"),
    (TimeSlot::Am9, "9am", "09"),
    (TimeSlot::Am10, "10am", "10"),
    (TimeSlot::Am11, "11am", "11"),
    (TimeSlot::Pm12, "12pm", "12"),
    (TimeSlot::Pm1, "1pm", "13"),
    (TimeSlot::Pm2, "2pm", "14"),
    (TimeSlot::Pm3, "3pm", "15"),
    (TimeSlot::Pm4, "4pm", "16"),
    (TimeSlot::Pm5, "5pm", "17"),
];

impl TimeSlot {
    /// Slot used when the user picks none.
    pub const DEFAULT: TimeSlot = TimeSlot::Am9;

    /// Every slot, earliest first.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        SLOT_TABLE.iter().map(|(slot, _, _)| *slot)
    }

    fn entry(&self) -> &'static (TimeSlot, &'static str, &'static str) {
        // Table order matches declaration order.
        &SLOT_TABLE[*self as usize]
    }

    /// Human-readable label such as `"9am"`.
    pub fn label(&self) -> &'static str {
        self.entry().1
    }

    /// Two-digit hour used in snapshot URLs, such as `"09"`.
    pub fn hour(&self) -> &'static str {
        self.entry().2
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SLOT_TABLE
            .iter()
            .find(|(_, label, hour)| *label == wanted || *hour == wanted)
            .map(|(slot, _, _)| *slot)
            .ok_or_else(|| LocatorError::UnknownTimeSlot(s.to_string()))
    }
}

/// Park season, which decides the opening hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    /// November to March.
    Winter,
    /// April to October.
    Summer,
}

impl Season {
    /// Season for a calendar month (1 = January).
    pub fn for_month(month: u32) -> Self {
        match month {
            11 | 12 | 1 | 2 | 3 => Season::Winter,
            _ => Season::Summer,
        }
    }

    /// Season for the local date.
    pub fn current() -> Self {
        Self::for_month(Local::now().month())
    }

    /// Slots offered for selection in this season.
    pub fn slots(&self) -> Vec<TimeSlot> {
        match self {
            Season::Winter => TimeSlot::all()
                .filter(|s| (TimeSlot::Am9..=TimeSlot::Pm4).contains(s))
                .collect(),
            Season::Summer => TimeSlot::all().collect(),
        }
    }

    /// Opening hours as shown to users.
    pub fn opening_hours(&self) -> &'static str {
        match self {
            Season::Winter => "Winter Season (Nov-Mar): 9am - 4pm",
            Season::Summer => "Summer Season (Apr-Oct): 8.30am - 5pm",
        }
    }
}

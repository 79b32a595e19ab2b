use chrono::{DateTime, Datelike, Utc};
use std::fmt;
use std::fmt::{Display, Formatter};

/// A calendar month, ordered chronologically (year first).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month(pub i32, pub u32);

impl Month {
    pub fn new(month: u32, year: i32) -> Self {
        Self(year, month)
    }
    pub fn year(self) -> i32 {
        self.0
    }
    pub fn month(self) -> u32 {
        self.1
    }
}

impl From<DateTime<Utc>> for Month {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.year(), value.month())
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}

use crate::model::Requirement;
use crate::snapshot::Snapshot;
use crate::types::{Priority, Status};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// YearMonth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .rsplit_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got '{s}'"))?;
        let year = y.parse::<i32>().map_err(|e| e.to_string())?;
        let month = m.parse::<u32>().map_err(|e| e.to_string())?;
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range in '{s}'"));
        }
        Ok(Self { year, month })
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// TimelineBucket
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub status: Status,
    pub blocking: bool,
    pub target_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineBucket {
    pub month: YearMonth,
    pub total_count: usize,
    /// Open blocking gaps due this month.
    pub blocking_count: usize,
    pub items: Vec<TimelineItem>,
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Requirements grouped by target month.
///
/// Construction only indexes positions; buckets are materialised on
/// iteration and `iter()` may be called any number of times.
pub struct Timeline<'a> {
    snapshot: &'a Snapshot,
    months: BTreeMap<YearMonth, Vec<usize>>,
}

impl<'a> Timeline<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        let mut months: BTreeMap<YearMonth, Vec<usize>> = BTreeMap::new();
        for (i, r) in snapshot.iter().enumerate() {
            if let Some(date) = r.target_date {
                months.entry(YearMonth::of(date)).or_default().push(i);
            }
        }
        Self { snapshot, months }
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TimelineBucket> + '_ {
        self.months.iter().map(move |(month, positions)| {
            let items: Vec<&Requirement> = positions
                .iter()
                .filter_map(|&i| self.snapshot.at(i))
                .collect();
            TimelineBucket {
                month: *month,
                total_count: items.len(),
                blocking_count: items.iter().filter(|r| r.is_blocking_gap()).count(),
                items: items.into_iter().filter_map(to_item).collect(),
            }
        })
    }
}

fn to_item(r: &Requirement) -> Option<TimelineItem> {
    Some(TimelineItem {
        id: r.id.clone(),
        title: r.title.clone(),
        priority: r.priority,
        status: r.status,
        blocking: r.blocking,
        target_date: r.target_date?,
    })
}

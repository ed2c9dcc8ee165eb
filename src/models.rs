use crate::errors::{StoreError, StoreResult};
use crate::visuals::{PainCell, TileVisual};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// A calendar day, independent of time-of-day. Serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> StoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| StoreError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = StoreError;

    /// Accepts a bare date or a timestamp; the time component is dropped.
    fn from_str(raw: &str) -> StoreResult<Self> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Self(date));
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(timestamp.date_naive()));
        }
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Self(timestamp.date()));
        }
        Err(StoreError::InvalidDate(raw.to_string()))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowLevel {
    Light,
    Regular,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodType {
    Fair,
    Good,
    Great,
}

/// Cramp pain on a 1..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CrampsLevel(u8);

impl CrampsLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(level: u8) -> StoreResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(StoreError::InvalidCrampsLevel(i64::from(level)))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CrampsLevel {
    type Error = StoreError;

    fn try_from(level: u8) -> StoreResult<Self> {
        Self::new(level)
    }
}

impl TryFrom<i64> for CrampsLevel {
    type Error = StoreError;

    fn try_from(level: i64) -> StoreResult<Self> {
        u8::try_from(level)
            .map_err(|_| StoreError::InvalidCrampsLevel(level))
            .and_then(Self::new)
    }
}

impl From<CrampsLevel> for u8 {
    fn from(level: CrampsLevel) -> Self {
        level.0
    }
}

/// The symptom checkboxes shown for each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symptom {
    Flow,
    Cramps,
    Mood,
}

/// Symptoms recorded for one calendar day.
///
/// A level only counts while its presence flag is set. Clearing a flag keeps
/// the level around so re-checking the box restores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DayRecord {
    pub flow_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_level: Option<FlowLevel>,
    pub cramps_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cramps_level: Option<CrampsLevel>,
    pub mood_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_type: Option<MoodType>,
}

impl DayRecord {
    pub fn toggle(&mut self, field: Symptom) {
        match field {
            Symptom::Flow => self.flow_present = !self.flow_present,
            Symptom::Cramps => self.cramps_present = !self.cramps_present,
            Symptom::Mood => self.mood_present = !self.mood_present,
        }
    }

    pub fn effective_flow_level(&self) -> Option<FlowLevel> {
        self.flow_present.then_some(self.flow_level).flatten()
    }

    pub fn effective_cramps_level(&self) -> Option<CrampsLevel> {
        self.cramps_present.then_some(self.cramps_level).flatten()
    }

    pub fn effective_mood(&self) -> Option<MoodType> {
        self.mood_present.then_some(self.mood_type).flatten()
    }
}

pub type CycleLog = BTreeMap<DateKey, DayRecord>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub subject_id: String,
    pub date: DateKey,
    pub record: DayRecord,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub field: Symptom,
}

#[derive(Debug, Deserialize)]
pub struct FlowLevelRequest {
    pub level: FlowLevel,
}

#[derive(Debug, Deserialize)]
pub struct CrampsLevelRequest {
    pub level: i64,
}

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub mood: MoodType,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: DateKey,
    pub record: Option<DayRecord>,
    pub tile: TileVisual,
    pub pain_scale: Vec<PainCell>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogDay {
    pub date: DateKey,
    pub record: DayRecord,
    pub tile: TileVisual,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogResponse {
    pub revision: u64,
    pub days: Vec<LogDay>,
}

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calendar::{day_of_year_from_month_day, parse_date_key};

/// One calendar event. Multi-day events carry an end date; `x`/`y` hold a
/// manually dragged label position once the user has moved one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// 0-indexed end month for multi-day events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl Annotation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn is_multi_day(&self) -> bool {
        self.end_month.is_some() && self.end_day.is_some()
    }

    pub fn end_date(&self) -> Option<(u32, u32)> {
        Some((self.end_month?, self.end_day?))
    }
}

/// Duration in days, inclusive of both endpoints; single-day events are 1.
/// An end date before the start yields a non-positive value, which the
/// priority scorer treats the same as a long event.
pub fn duration_days(date_key: &str, annotation: &Annotation, year: i32) -> i64 {
    let Some((start_month, start_day)) = parse_date_key(date_key) else {
        return 1;
    };
    let Some((end_month, end_day)) = annotation.end_date() else {
        return 1;
    };
    let start = day_of_year_from_month_day(start_month, start_day, year) as i64;
    let end = day_of_year_from_month_day(end_month, end_day, year) as i64;
    end - start + 1
}

/// All events for a year, keyed by `"month-day"` date keys (1-indexed month)
/// with an ordered list per day. Serializes to the same JSON shape the web
/// client persists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationStore {
    map: BTreeMap<String, Vec<Annotation>>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Total event count across all days.
    pub fn len(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[Annotation])> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn get(&self, date_key: &str, index: usize) -> Option<&Annotation> {
        self.map.get(date_key)?.get(index)
    }

    pub fn add(&mut self, date_key: &str, annotation: Annotation) {
        self.map
            .entry(date_key.to_string())
            .or_default()
            .push(annotation);
    }

    /// Apply `changes` to one event. Returns false when the key or index does
    /// not exist.
    pub fn update(
        &mut self,
        date_key: &str,
        index: usize,
        changes: impl FnOnce(&mut Annotation),
    ) -> bool {
        match self.map.get_mut(date_key).and_then(|list| list.get_mut(index)) {
            Some(annotation) => {
                changes(annotation);
                true
            }
            None => false,
        }
    }

    /// Remove one event, dropping the date key once its list empties.
    pub fn remove(&mut self, date_key: &str, index: usize) -> Option<Annotation> {
        let list = self.map.get_mut(date_key)?;
        if index >= list.len() {
            return None;
        }
        let removed = list.remove(index);
        if list.is_empty() {
            self.map.remove(date_key);
        }
        Some(removed)
    }

    /// Move an event to another date, appending at the target.
    pub fn move_annotation(&mut self, old_key: &str, index: usize, new_key: &str) -> bool {
        match self.remove(old_key, index) {
            Some(annotation) => {
                self.add(new_key, annotation);
                true
            }
            None => false,
        }
    }

    /// Persist a dragged label position onto its event record.
    pub fn set_position(&mut self, date_key: &str, index: usize, x: f32, y: f32) -> bool {
        self.update(date_key, index, |annotation| {
            annotation.x = Some(x);
            annotation.y = Some(y);
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.map).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse a persisted store; malformed input yields an empty store.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&contents))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json())?;
        Ok(())
    }
}

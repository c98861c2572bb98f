use crate::errors::TrackerError;
use crate::models::{Entry, ImportSummary};
use crate::normalize::{date_key, is_valid_date_key, normalize};
use crate::schema::MetricField;
use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How an imported entry combines with one already stored at its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// The imported entry replaces the stored one wholesale.
    #[default]
    Replace,
    /// Imported fields are laid over the stored entry, as `upsert` does.
    Merge,
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "merge" => Ok(Self::Merge),
            other => Err(format!("unknown import mode '{other}'")),
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Replace => "replace",
            Self::Merge => "merge",
        })
    }
}

/// Date-keyed entries. Every key matches the date key pattern and every
/// value went through `normalize` on its way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntryStore {
    entries: BTreeMap<String, Entry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from its persisted JSON form. Anything that is not
    /// an object yields an empty store; bad keys are dropped.
    pub fn from_persisted(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let entries = object
            .iter()
            .filter(|(key, _)| is_valid_date_key(key))
            .map(|(key, raw)| (key.clone(), normalize(raw)))
            .collect();
        Self { entries }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// The stored entry for `date`, or an all-defaults entry.
    pub fn entry_for(&self, date: NaiveDate) -> Entry {
        self.entries.get(&date_key(date)).cloned().unwrap_or_default()
    }

    pub fn today(&self) -> Entry {
        self.entry_for(Local::now().date_naive())
    }

    /// Lays `partial` over the entry stored at `date` (or the defaults),
    /// normalizes the result, stamps it and stores it.
    pub fn upsert(&mut self, date: NaiveDate, partial: &Value) -> Entry {
        self.upsert_at(date, partial, Utc::now())
    }

    pub fn upsert_at(&mut self, date: NaiveDate, partial: &Value, now: DateTime<Utc>) -> Entry {
        let key = date_key(date);
        let mut merged = self.stored_fields(&key);
        overlay(&mut merged, partial);
        merged.insert("date".to_string(), Value::String(key.clone()));
        merged.insert(
            "updated_at".to_string(),
            Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        let entry = normalize(&Value::Object(merged));
        self.entries.insert(key, entry.clone());
        entry
    }

    /// Single dispatch point for one edited input.
    pub fn apply_field_update(&mut self, date: NaiveDate, field: MetricField, raw: Value) -> Entry {
        let mut partial = Map::new();
        partial.insert(field.name().to_string(), raw);
        self.upsert(date, &Value::Object(partial))
    }

    /// Stores `raw`, normalized, at `date` without merging.
    pub fn replace(&mut self, date: NaiveDate, raw: &Value) -> Entry {
        let entry = normalize(raw);
        self.entries.insert(date_key(date), entry.clone());
        entry
    }

    /// Applies an import payload. Keys that are not date keys are skipped.
    /// A payload that is not a JSON object is rejected and nothing changes.
    pub fn bulk_merge(&mut self, candidates: &Value, mode: ImportMode) -> Result<ImportSummary, TrackerError> {
        let Some(object) = candidates.as_object() else {
            return Err(TrackerError::ImportFormat(format!(
                "expected an object keyed by date, found {}",
                json_kind(candidates)
            )));
        };

        let mut summary = ImportSummary::default();
        let mut accepted = Vec::with_capacity(object.len());
        for (key, raw) in object {
            if !is_valid_date_key(key) {
                summary.skipped += 1;
                continue;
            }
            let entry = match mode {
                ImportMode::Replace => normalize(raw),
                ImportMode::Merge => {
                    let mut merged = self.stored_fields(key);
                    overlay(&mut merged, raw);
                    normalize(&Value::Object(merged))
                }
            };
            accepted.push((key.clone(), entry));
        }

        summary.imported = accepted.len();
        self.entries.extend(accepted);
        Ok(summary)
    }

    /// Stored entries dated within `[start, end]`, oldest first.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> Vec<(&str, &Entry)> {
        if start > end {
            return Vec::new();
        }
        self.entries
            .range(date_key(start)..=date_key(end))
            .filter(|(key, _)| NaiveDate::parse_from_str(key, "%Y-%m-%d").is_ok())
            .map(|(key, entry)| (key.as_str(), entry))
            .collect()
    }

    fn stored_fields(&self, key: &str) -> Map<String, Value> {
        let base = self.entries.get(key).cloned().unwrap_or_default();
        match base.to_value() {
            Value::Object(fields) => fields,
            _ => Map::new(),
        }
    }
}

/// `mood-data-YYYYMMDD.json`
pub fn export_filename(today: NaiveDate) -> String {
    format!("mood-data-{}.json", today.format("%Y%m%d"))
}

fn overlay(target: &mut Map<String, Value>, partial: &Value) {
    if let Some(fields) = partial.as_object() {
        for (name, value) in fields {
            target.insert(name.clone(), value.clone());
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

use crate::schema::MetricField;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One day's values. Built through `normalize`, so every field is in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub mood: i32,
    pub sleep_hours: i32,
    pub creative_hours: i32,
    pub meal_count: i32,
    pub exercise_minutes: i32,
    pub took_medicine: i32,
    pub took_sleep_medicine: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            mood: MetricField::Mood.default_value(),
            sleep_hours: MetricField::SleepHours.default_value(),
            creative_hours: MetricField::CreativeHours.default_value(),
            meal_count: MetricField::MealCount.default_value(),
            exercise_minutes: MetricField::ExerciseMinutes.default_value(),
            took_medicine: MetricField::TookMedicine.default_value(),
            took_sleep_medicine: MetricField::TookSleepMedicine.default_value(),
            date: None,
            updated_at: None,
        }
    }
}

impl Entry {
    pub fn get(&self, field: MetricField) -> i32 {
        match field {
            MetricField::Mood => self.mood,
            MetricField::SleepHours => self.sleep_hours,
            MetricField::CreativeHours => self.creative_hours,
            MetricField::MealCount => self.meal_count,
            MetricField::ExerciseMinutes => self.exercise_minutes,
            MetricField::TookMedicine => self.took_medicine,
            MetricField::TookSleepMedicine => self.took_sleep_medicine,
        }
    }

    pub(crate) fn slot_mut(&mut self, field: MetricField) -> &mut i32 {
        match field {
            MetricField::Mood => &mut self.mood,
            MetricField::SleepHours => &mut self.sleep_hours,
            MetricField::CreativeHours => &mut self.creative_hours,
            MetricField::MealCount => &mut self.meal_count,
            MetricField::ExerciseMinutes => &mut self.exercise_minutes,
            MetricField::TookMedicine => &mut self.took_medicine,
            MetricField::TookSleepMedicine => &mut self.took_sleep_medicine,
        }
    }

    /// The JSON object form, as persisted and exported.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Deserialize)]
pub struct FieldUpdateRequest {
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub date: String,
    pub entry: Entry,
    pub saved: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatedEntry {
    pub date: String,
    pub entry: Entry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub generated: usize,
}

/// One named line of the chart payload. `None` is a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesLine {
    pub field: MetricField,
    pub values: Vec<Option<i32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub days: u32,
    pub dates: Vec<String>,
    pub labels: Vec<String>,
    pub series: Vec<SeriesLine>,
    pub meal_scaled: Vec<Option<f64>>,
    pub exercise_scaled: Vec<Option<f64>>,
    pub medicine_markers: Vec<Option<i32>>,
    pub shared_axis_max: i32,
}

impl SeriesResponse {
    pub fn line(&self, field: MetricField) -> Option<&[Option<i32>]> {
        self.series
            .iter()
            .find(|line| line.field == field)
            .map(|line| line.values.as_slice())
    }
}

use crate::models::{SeriesLine, SeriesResponse};
use crate::normalize::date_key;
use crate::schema::{MetricField, MissingDay};
use crate::store::EntryStore;
use chrono::{Datelike, Duration, NaiveDate};
use std::num::NonZeroU32;

/// Meals and exercise share the sleep axis on the chart.
pub const SHARED_AXIS: MetricField = MetricField::SleepHours;

/// Dates from `anchor - (days - 1)` through `anchor`, oldest first.
pub fn build_window(days: NonZeroU32, anchor: NaiveDate) -> Vec<NaiveDate> {
    (0..days.get())
        .rev()
        .map(|offset| anchor - Duration::days(i64::from(offset)))
        .collect()
}

/// One value per date. Days without an entry become `None`, except for
/// fields whose missing-day policy is zero.
pub fn project(store: &EntryStore, dates: &[NaiveDate], field: MetricField) -> Vec<Option<i32>> {
    dates
        .iter()
        .map(|date| match store.get(&date_key(*date)) {
            Some(entry) => Some(entry.get(field)),
            None => match field.missing_day() {
                MissingDay::Gap => None,
                MissingDay::Zero => Some(0),
            },
        })
        .collect()
}

/// Linear rescale from `[0, source_max]` to `[0, target_max]`. Gaps pass
/// through; a zero `source_max` has no scale and yields gaps.
pub fn derive_scaled(series: &[Option<i32>], source_max: f64, target_max: f64) -> Vec<Option<f64>> {
    let scalable = (target_max / source_max).is_finite();
    series
        .iter()
        .map(|value| {
            value
                .filter(|_| scalable)
                .map(|v| f64::from(v) * target_max / source_max)
        })
        .collect()
}

pub fn short_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

pub fn assemble(store: &EntryStore, days: NonZeroU32, anchor: NaiveDate) -> SeriesResponse {
    let window = build_window(days, anchor);
    let series: Vec<SeriesLine> = MetricField::ALL
        .into_iter()
        .map(|field| SeriesLine {
            field,
            values: project(store, &window, field),
        })
        .collect();

    let shared_max = SHARED_AXIS.max();
    let scaled = |field: MetricField| {
        let values = project(store, &window, field);
        derive_scaled(&values, f64::from(field.max()), f64::from(shared_max))
    };

    SeriesResponse {
        days: days.get(),
        dates: window.iter().map(|date| date_key(*date)).collect(),
        labels: window.iter().map(|date| short_label(*date)).collect(),
        meal_scaled: scaled(MetricField::MealCount),
        exercise_scaled: scaled(MetricField::ExerciseMinutes),
        medicine_markers: project(store, &window, MetricField::TookMedicine),
        shared_axis_max: shared_max,
        series,
    }
}

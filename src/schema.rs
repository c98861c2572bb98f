use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a field's raw value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Rounded and clamped into `[min, max]`.
    Integer { min: i32, max: i32 },
    /// 0 or 1.
    Binary,
}

/// What a series emits for a day with no stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDay {
    Gap,
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    Mood,
    SleepHours,
    CreativeHours,
    MealCount,
    ExerciseMinutes,
    TookMedicine,
    TookSleepMedicine,
}

impl MetricField {
    pub const ALL: [MetricField; 7] = [
        MetricField::Mood,
        MetricField::SleepHours,
        MetricField::CreativeHours,
        MetricField::MealCount,
        MetricField::ExerciseMinutes,
        MetricField::TookMedicine,
        MetricField::TookSleepMedicine,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mood => "mood",
            Self::SleepHours => "sleep_hours",
            Self::CreativeHours => "creative_hours",
            Self::MealCount => "meal_count",
            Self::ExerciseMinutes => "exercise_minutes",
            Self::TookMedicine => "took_medicine",
            Self::TookSleepMedicine => "took_sleep_medicine",
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Mood => FieldKind::Integer { min: 1, max: 5 },
            Self::SleepHours => FieldKind::Integer { min: 2, max: 16 },
            Self::CreativeHours => FieldKind::Integer { min: 0, max: 10 },
            Self::MealCount => FieldKind::Integer { min: 0, max: 5 },
            Self::ExerciseMinutes => FieldKind::Integer { min: 0, max: 60 },
            Self::TookMedicine | Self::TookSleepMedicine => FieldKind::Binary,
        }
    }

    pub const fn default_value(self) -> i32 {
        match self {
            Self::Mood => 3,
            Self::SleepHours => 7,
            _ => 0,
        }
    }

    /// Upper bound of the field's natural range; 1 for binary fields.
    pub const fn max(self) -> i32 {
        match self.kind() {
            FieldKind::Integer { max, .. } => max,
            FieldKind::Binary => 1,
        }
    }

    /// Medication adherence reads a missing day as "not taken". The sleep
    /// medicine flag colours sleep points, so it keeps the gap.
    pub const fn missing_day(self) -> MissingDay {
        match self {
            Self::TookMedicine => MissingDay::Zero,
            _ => MissingDay::Gap,
        }
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for MetricField {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == value)
            .ok_or_else(|| UnknownField(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for field in MetricField::ALL {
            assert_eq!(field.name().parse::<MetricField>(), Ok(field));
        }
        assert!("weight".parse::<MetricField>().is_err());
    }

    #[test]
    fn defaults_sit_inside_declared_ranges() {
        for field in MetricField::ALL {
            let value = field.default_value();
            match field.kind() {
                FieldKind::Integer { min, max } => assert!((min..=max).contains(&value), "{field}"),
                FieldKind::Binary => assert_eq!(value, 0),
            }
        }
    }

    #[test]
    fn only_took_medicine_fills_missing_days_with_zero() {
        let zero_filled: Vec<_> = MetricField::ALL
            .into_iter()
            .filter(|field| field.missing_day() == MissingDay::Zero)
            .collect();
        assert_eq!(zero_filled, vec![MetricField::TookMedicine]);
    }
}

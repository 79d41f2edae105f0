use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One confirmed menstrual cycle as recorded by the store.
/// `end_date = None` means the period is still ongoing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleRecord {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Only confirmed records feed prediction.
    pub is_confirmed: bool,
    /// Store-level override; when present it supersedes the length derived
    /// from consecutive start dates for phase classification inside this cycle.
    pub cycle_length_days: Option<i64>,
}

impl CycleRecord {
    pub fn confirmed(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_date,
            end_date,
            is_confirmed: true,
            cycle_length_days: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Immutable output of one prediction run. Produced fresh on every refresh,
/// never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prediction {
    pub predicted_next_start: NaiveDate,
    pub predicted_period_length: i64,
    pub predicted_cycle_length: i64,
    pub estimated_ovulation: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
    pub confidence: Confidence,
    pub is_irregular: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OpkOutcome {
    Negative,
    Faint,
    Positive,
}

/// One ovulation-test reading. Read-only input to signal fusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpkResult {
    pub date: NaiveDate,
    pub result: OpkOutcome,
}

/// One basal-body-temperature reading, degrees Celsius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BbtEntry {
    pub date: NaiveDate,
    pub temperature_celsius: f64,
}

/// Derived, never persisted: a pure function of (anchor, prediction, date).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

/// A prediction after signal fusion, plus the derived BBT signals.
/// `coverline` is `None` when too few readings exist; `thermal_shift` is a
/// confirmatory flag and never moves the ovulation estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionOutcome {
    pub prediction: Prediction,
    pub coverline: Option<f64>,
    pub thermal_shift: bool,
}

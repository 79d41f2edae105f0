use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::config::PredictionConfig;
use crate::models::{BbtEntry, CycleRecord, FusionOutcome, OpkOutcome, OpkResult, Prediction};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FusionError {
    #[error("temperature {celsius}°C on {date} is outside the plausible range")]
    TemperatureOutOfRange { date: NaiveDate, celsius: f64 },
}

/// Sharpen a calendar prediction with ovulation-test results.
///
/// A positive test dated within the current cycle — on or after its start,
/// on or before the predicted next start — replaces the estimated ovulation
/// date and re-anchors the fertile window. Positives outside that window are
/// stale and ignored; among several eligible positives the latest wins, as
/// the freshest surge signal.
pub fn apply_overrides(
    base: &Prediction,
    records: &[CycleRecord],
    opk_results: &[OpkResult],
    config: &PredictionConfig,
) -> Prediction {
    let Some(current_start) = current_cycle_start(records) else {
        return base.clone();
    };
    let surge = opk_results
        .iter()
        .filter(|r| r.result == OpkOutcome::Positive)
        .filter(|r| r.date >= current_start && r.date <= base.predicted_next_start)
        .max_by_key(|r| r.date);
    let Some(surge) = surge else {
        return base.clone();
    };

    debug!(surge_date = %surge.date, "positive opk overrides calendar ovulation estimate");

    let mut fused = base.clone();
    fused.estimated_ovulation = surge.date;
    fused.fertile_window_start = surge.date - Duration::days(config.fertile_window_span - 1);
    fused.fertile_window_end = surge.date;
    fused
}

/// Basal-temperature baseline: mean of the lowest third of the readings.
/// `None` until enough readings exist. Out-of-range temperatures are a
/// caller bug and rejected outright.
pub fn coverline(
    entries: &[BbtEntry],
    config: &PredictionConfig,
) -> Result<Option<f64>, FusionError> {
    validate_temperatures(entries, config)?;
    if entries.len() < config.coverline_min_readings {
        return Ok(None);
    }

    let mut temps: Vec<f64> = entries.iter().map(|e| e.temperature_celsius).collect();
    temps.sort_by(|a, b| a.total_cmp(b));
    let take = (temps.len() / 3).max(1);
    Ok(Some(temps[..take].iter().sum::<f64>() / take as f64))
}

/// A thermal shift is declared when enough of the most recent readings sit
/// above coverline + delta. Confirmatory only: ovulation already happened,
/// so this never moves the ovulation estimate.
pub fn has_thermal_shift(
    entries: &[BbtEntry],
    config: &PredictionConfig,
) -> Result<bool, FusionError> {
    let Some(cover) = coverline(entries, config)? else {
        return Ok(false);
    };

    let mut by_date: Vec<&BbtEntry> = entries.iter().collect();
    by_date.sort_by_key(|e| e.date);
    let recent = &by_date[by_date.len().saturating_sub(config.thermal_shift_window)..];
    let above = recent
        .iter()
        .filter(|e| e.temperature_celsius > cover + config.thermal_shift_delta_c)
        .count();
    Ok(above >= config.thermal_shift_required)
}

/// One-call fusion: OPK override plus the derived BBT signals. Insufficient
/// data for either signal leaves the base prediction authoritative.
pub fn fuse(
    base: &Prediction,
    records: &[CycleRecord],
    opk_results: &[OpkResult],
    bbt_entries: &[BbtEntry],
    config: &PredictionConfig,
) -> Result<FusionOutcome, FusionError> {
    let coverline = coverline(bbt_entries, config)?;
    let thermal_shift = has_thermal_shift(bbt_entries, config)?;
    Ok(FusionOutcome {
        prediction: apply_overrides(base, records, opk_results, config),
        coverline,
        thermal_shift,
    })
}

fn current_cycle_start(records: &[CycleRecord]) -> Option<NaiveDate> {
    records
        .iter()
        .filter(|r| r.is_confirmed)
        .map(|r| r.start_date)
        .max()
}

fn validate_temperatures(
    entries: &[BbtEntry],
    config: &PredictionConfig,
) -> Result<(), FusionError> {
    for entry in entries {
        if !config.plausible_temperature(entry.temperature_celsius) {
            return Err(FusionError::TemperatureOutOfRange {
                date: entry.date,
                celsius: entry.temperature_celsius,
            });
        }
    }
    Ok(())
}

use chrono::Duration;
use tracing::debug;

use crate::config::PredictionConfig;
use crate::models::{Confidence, CycleRecord, Prediction};

/// Run the calendar predictor over confirmed cycle records.
/// Returns `None` only when no confirmed record exists at all — with at
/// least one anchor date the predictor always produces output, falling back
/// to the configured defaults when the history has no usable cycle lengths.
pub fn predict(records: &[CycleRecord], config: &PredictionConfig) -> Option<Prediction> {
    let mut confirmed: Vec<&CycleRecord> = records.iter().filter(|r| r.is_confirmed).collect();
    if confirmed.is_empty() {
        return None;
    }
    confirmed.sort_by_key(|r| r.start_date);
    let last_start = confirmed[confirmed.len() - 1].start_date;

    // Lengths come from consecutive start dates; implausible gaps are
    // data-entry noise and are dropped from the statistics, not the store.
    let cycle_lengths: Vec<i64> = confirmed
        .windows(2)
        .map(|w| (w[1].start_date - w[0].start_date).num_days())
        .filter(|&d| config.plausible_cycle_length(d))
        .collect();

    let period_lengths: Vec<i64> = confirmed
        .iter()
        .filter_map(|r| r.end_date.map(|end| (end - r.start_date).num_days() + 1))
        .collect();

    let predicted_cycle_length = if cycle_lengths.is_empty() {
        config.default_cycle_length
    } else {
        mean_rounded(&cycle_lengths)
    };
    let predicted_period_length = if period_lengths.is_empty() {
        config.default_period_length
    } else {
        mean_rounded(&period_lengths)
    };

    let predicted_next_start = last_start + Duration::days(predicted_cycle_length);
    let estimated_ovulation = predicted_next_start - Duration::days(config.luteal_phase_length);
    let fertile_window_start =
        estimated_ovulation - Duration::days(config.fertile_window_span - 1);

    let is_irregular = is_irregular(&cycle_lengths, config);
    let confidence = score_confidence(cycle_lengths.len(), is_irregular, config);

    debug!(
        usable_cycles = cycle_lengths.len(),
        %predicted_next_start,
        ?confidence,
        is_irregular,
        "prediction refreshed"
    );

    Some(Prediction {
        predicted_next_start,
        predicted_period_length,
        predicted_cycle_length,
        estimated_ovulation,
        fertile_window_start,
        fertile_window_end: estimated_ovulation,
        confidence,
        is_irregular,
    })
}

/// Spread between the shortest and longest recent usable cycle.
fn is_irregular(cycle_lengths: &[i64], config: &PredictionConfig) -> bool {
    let recent =
        &cycle_lengths[cycle_lengths.len().saturating_sub(config.irregularity_window_cycles)..];
    match (recent.iter().min(), recent.iter().max()) {
        (Some(min), Some(max)) => max - min > config.irregularity_threshold_days,
        _ => false,
    }
}

fn score_confidence(usable_cycles: usize, irregular: bool, config: &PredictionConfig) -> Confidence {
    if usable_cycles < config.min_cycles_for_medium_confidence {
        Confidence::Low
    } else if usable_cycles >= config.min_cycles_for_high_confidence && !irregular {
        Confidence::High
    } else {
        Confidence::Medium
    }
}

fn mean_rounded(values: &[i64]) -> i64 {
    (values.iter().sum::<i64>() as f64 / values.len() as f64).round() as i64
}

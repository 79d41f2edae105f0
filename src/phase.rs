use chrono::NaiveDate;

use crate::config::PredictionConfig;
use crate::models::{CyclePhase, CycleRecord, Prediction};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PhaseError {
    #[error("date {date} is before the cycle anchor {anchor}")]
    OutOfRangeDate { date: NaiveDate, anchor: NaiveDate },
}

/// 1-based day within the cycle anchored at `anchor_start` (day 1 is the
/// anchor itself). Dates before the anchor are an error, never clamped —
/// a silently clamped date would corrupt phase classification downstream.
pub fn cycle_day(date: NaiveDate, anchor_start: NaiveDate) -> Result<i64, PhaseError> {
    let offset = (date - anchor_start).num_days();
    if offset < 0 {
        return Err(PhaseError::OutOfRangeDate {
            date,
            anchor: anchor_start,
        });
    }
    Ok(offset + 1)
}

/// Classify a date into a cycle phase.
///
/// `cycle_length` is passed separately from the prediction so a record-level
/// length override can supersede the predicted value (see
/// [`effective_cycle_length`]). Ranges are non-overlapping and cover every
/// day; when a very short cycle would put the ovulation band inside the
/// period, menstrual wins the overlap.
pub fn phase_for(
    date: NaiveDate,
    anchor_start: NaiveDate,
    cycle_length: i64,
    prediction: &Prediction,
    config: &PredictionConfig,
) -> Result<CyclePhase, PhaseError> {
    let day = cycle_day(date, anchor_start)?;
    let ovulation_day = cycle_length - config.luteal_phase_length;

    let phase = if day <= prediction.predicted_period_length {
        CyclePhase::Menstrual
    } else if day >= ovulation_day - 1 && day <= ovulation_day + 1 {
        CyclePhase::Ovulation
    } else if day < ovulation_day - 1 {
        CyclePhase::Follicular
    } else {
        CyclePhase::Luteal
    };
    Ok(phase)
}

/// Cycle length to use when classifying logs inside a given record:
/// the store-level override wins over the predicted length.
pub fn effective_cycle_length(record: &CycleRecord, prediction: &Prediction) -> i64 {
    record
        .cycle_length_days
        .unwrap_or(prediction.predicted_cycle_length)
}

/// Days past the predicted start, or `None` while the period is not yet due.
pub fn days_late(prediction: &Prediction, today: NaiveDate) -> Option<i64> {
    if today < prediction.predicted_next_start {
        None
    } else {
        Some((today - prediction.predicted_next_start).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;
    use chrono::Duration;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn prediction(cycle_length: i64, period_length: i64) -> Prediction {
        let next_start = date("2026-02-01");
        let ovulation = next_start - Duration::days(14);
        Prediction {
            predicted_next_start: next_start,
            predicted_period_length: period_length,
            predicted_cycle_length: cycle_length,
            estimated_ovulation: ovulation,
            fertile_window_start: ovulation - Duration::days(5),
            fertile_window_end: ovulation,
            confidence: Confidence::Medium,
            is_irregular: false,
        }
    }

    fn phase_on_day(day: i64, cycle_length: i64, period_length: i64) -> CyclePhase {
        let cfg = PredictionConfig::default();
        let anchor = date("2026-01-01");
        let pred = prediction(cycle_length, period_length);
        phase_for(anchor + Duration::days(day - 1), anchor, cycle_length, &pred, &cfg).unwrap()
    }

    #[test]
    fn standard_cycle_maps_all_four_phases() {
        // 28-day cycle, 5-day period: ovulation day is 14.
        assert_eq!(phase_on_day(1, 28, 5), CyclePhase::Menstrual);
        assert_eq!(phase_on_day(5, 28, 5), CyclePhase::Menstrual);
        assert_eq!(phase_on_day(6, 28, 5), CyclePhase::Follicular);
        assert_eq!(phase_on_day(12, 28, 5), CyclePhase::Follicular);
        assert_eq!(phase_on_day(13, 28, 5), CyclePhase::Ovulation);
        assert_eq!(phase_on_day(14, 28, 5), CyclePhase::Ovulation);
        assert_eq!(phase_on_day(15, 28, 5), CyclePhase::Ovulation);
        assert_eq!(phase_on_day(16, 28, 5), CyclePhase::Luteal);
        assert_eq!(phase_on_day(28, 28, 5), CyclePhase::Luteal);
    }

    #[test]
    fn short_cycle_with_empty_follicular_range_does_not_panic() {
        // 18-day cycle, 5-day period: ovulation day is 4, so the ovulation
        // band sits inside the period. Menstrual wins the overlap and days
        // fall straight from menstrual into luteal.
        assert_eq!(phase_on_day(1, 18, 5), CyclePhase::Menstrual);
        assert_eq!(phase_on_day(4, 18, 5), CyclePhase::Menstrual);
        assert_eq!(phase_on_day(5, 18, 5), CyclePhase::Menstrual);
        assert_eq!(phase_on_day(6, 18, 5), CyclePhase::Luteal);
        assert_eq!(phase_on_day(18, 18, 5), CyclePhase::Luteal);
    }

    #[test]
    fn ovulation_band_directly_after_period() {
        // 21-day cycle, 5-day period: ovulation day 7, band 6..=8.
        assert_eq!(phase_on_day(5, 21, 5), CyclePhase::Menstrual);
        assert_eq!(phase_on_day(6, 21, 5), CyclePhase::Ovulation);
        assert_eq!(phase_on_day(8, 21, 5), CyclePhase::Ovulation);
        assert_eq!(phase_on_day(9, 21, 5), CyclePhase::Luteal);
    }

    #[test]
    fn date_before_anchor_is_rejected() {
        let cfg = PredictionConfig::default();
        let anchor = date("2026-01-10");
        let pred = prediction(28, 5);
        let result = phase_for(date("2026-01-09"), anchor, 28, &pred, &cfg);
        assert_eq!(
            result,
            Err(PhaseError::OutOfRangeDate {
                date: date("2026-01-09"),
                anchor,
            })
        );
    }

    #[test]
    fn cycle_day_is_one_based() {
        let anchor = date("2026-01-10");
        assert_eq!(cycle_day(anchor, anchor), Ok(1));
        assert_eq!(cycle_day(date("2026-01-19"), anchor), Ok(10));
        assert!(cycle_day(date("2026-01-09"), anchor).is_err());
    }

    #[test]
    fn record_override_supersedes_predicted_length() {
        let pred = prediction(28, 5);
        let mut rec = CycleRecord::confirmed(date("2026-01-01"), None);
        assert_eq!(effective_cycle_length(&rec, &pred), 28);
        rec.cycle_length_days = Some(31);
        assert_eq!(effective_cycle_length(&rec, &pred), 31);
    }

    #[test]
    fn days_late_is_none_until_the_predicted_start() {
        let pred = prediction(28, 5);
        assert_eq!(days_late(&pred, date("2026-01-31")), None);
        assert_eq!(days_late(&pred, date("2026-02-01")), Some(0));
        assert_eq!(days_late(&pred, date("2026-02-04")), Some(3));
    }
}

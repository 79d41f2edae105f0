use serde::{Deserialize, Serialize};

/// Tunable parameters for the prediction engine. Every threshold the
/// algorithms use lives here so the host app can adjust them without
/// touching the algorithm shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Cycle length assumed when no usable history exists.
    pub default_cycle_length: i64,
    /// Period length assumed when no completed period exists.
    pub default_period_length: i64,
    /// Days from ovulation to the next period start.
    pub luteal_phase_length: i64,
    /// Total days in the fertile window, ending on ovulation day.
    pub fertile_window_span: i64,
    /// Spread between shortest and longest recent cycle that flags irregularity.
    pub irregularity_threshold_days: i64,
    /// How many recent cycles the irregularity check looks at.
    pub irregularity_window_cycles: usize,
    /// Usable cycles needed to leave low confidence.
    pub min_cycles_for_medium_confidence: usize,
    /// Usable cycles needed for high confidence (when regular).
    pub min_cycles_for_high_confidence: usize,
    /// Cycle lengths outside this range are treated as data-entry noise.
    pub plausible_cycle_min_days: i64,
    pub plausible_cycle_max_days: i64,
    /// Physiologically plausible basal temperature bounds, °C.
    pub plausible_temp_min_c: f64,
    pub plausible_temp_max_c: f64,
    /// Readings required before a coverline can be computed.
    pub coverline_min_readings: usize,
    /// Rise above the coverline that counts toward a thermal shift, °C.
    pub thermal_shift_delta_c: f64,
    /// How many of the most recent readings the shift check looks at.
    pub thermal_shift_window: usize,
    /// How many of those must exceed coverline + delta.
    pub thermal_shift_required: usize,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            default_cycle_length: 28,
            default_period_length: 5,
            luteal_phase_length: 14,
            fertile_window_span: 6,
            irregularity_threshold_days: 7,
            irregularity_window_cycles: 6,
            min_cycles_for_medium_confidence: 3,
            min_cycles_for_high_confidence: 6,
            plausible_cycle_min_days: 10,
            plausible_cycle_max_days: 60,
            plausible_temp_min_c: 30.0,
            plausible_temp_max_c: 42.0,
            coverline_min_readings: 6,
            thermal_shift_delta_c: 0.2,
            thermal_shift_window: 6,
            thermal_shift_required: 3,
        }
    }
}

impl PredictionConfig {
    pub fn plausible_cycle_length(&self, days: i64) -> bool {
        days >= self.plausible_cycle_min_days && days <= self.plausible_cycle_max_days
    }

    pub fn plausible_temperature(&self, celsius: f64) -> bool {
        celsius >= self.plausible_temp_min_c && celsius <= self.plausible_temp_max_c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = PredictionConfig::default();
        assert_eq!(cfg.default_cycle_length, 28);
        assert_eq!(cfg.luteal_phase_length, 14);
        assert!(cfg.plausible_cycle_length(28));
        assert!(!cfg.plausible_cycle_length(9));
        assert!(!cfg.plausible_cycle_length(61));
        assert!(cfg.plausible_temperature(36.5));
        assert!(!cfg.plausible_temperature(25.0));
    }

    #[test]
    fn config_roundtrips_through_json() {
        let cfg = PredictionConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PredictionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fertile_window_span, cfg.fertile_window_span);
        assert_eq!(back.thermal_shift_window, cfg.thermal_shift_window);
    }
}

pub mod stage1_baselines;
pub mod stage2_round_score;
pub mod stage3_season;
pub mod stage4_ranking;
pub mod stage5_round_details;
pub mod stage6_report;

/// Rounds half away from zero to 2 decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

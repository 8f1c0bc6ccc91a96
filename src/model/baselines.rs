/// Best-in-round reference values used to normalize one round's scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baselines {
    pub payload: f64,
    pub loading_time: f64,
    pub circuit_time: f64,
    pub glide_time: f64,
}

impl Baselines {
    pub const NEUTRAL: Baselines = Baselines {
        payload: 1.0,
        loading_time: 1.0,
        circuit_time: 1.0,
        glide_time: 1.0,
    };
}

impl Default for Baselines {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

pub mod baselines;
pub mod category;
pub mod round;
pub mod rules;
pub mod team;

pub mod achievements;
pub mod dashboard;
pub mod income;
pub mod overlap;
pub mod period;
pub mod targets;
pub mod tip;

pub mod insight_calculator;
pub mod insight_policy;
pub mod statistics;

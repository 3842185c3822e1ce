pub mod peaks;
pub mod percentile;
pub mod smoothing;

//! Shared constants and small numeric helpers for the orbit engine.

pub mod angles;
pub mod constants;

pub use angles::{mean_anomaly, reduce_time};

#[cfg(test)]
mod tests;

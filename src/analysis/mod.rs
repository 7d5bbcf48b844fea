//! Decision layer
//!
//! Turns the three calibrated classifier probabilities into the final
//! three-way verdict:
//! - Result types ([`result`])
//! - Probability aggregation and thresholding ([`decision`])

pub mod decision;
pub mod result;

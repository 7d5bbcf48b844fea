//! Fitted model artifacts and ensemble wiring
//!
//! The models themselves are fitted by an external component; this module
//! loads their persisted parameters and serves read-only inference:
//! - Feature standardization (shared scaler)
//! - Calibrated classifiers (logistic, RBF SVM, bagged trees)
//! - The ensemble handle loaded once per process

pub mod classifier;
pub mod ensemble;
pub mod scaler;

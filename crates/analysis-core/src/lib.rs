//! Roundscope Analysis Core
//!
//! Turns sampled gauge pixels into a discrete event timeline:
//! - **Pixel Classification:** negative-space "is this pixel filled health"
//! - **Bar Estimation:** column-majority percentage per gauge region
//! - **Reading Smoothing:** centered moving average over the reading stream
//! - **Event Extraction:** stateful reduction to the ordered event sequence
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod classify;
pub mod extract;
pub mod gauge;
pub mod smooth;

pub use classify::{ClassifierConfig, PixelClassifier};
pub use extract::{EventExtractor, ExtractorConfig};
pub use gauge::{GaugeEstimator, GaugeReading, PixelRegion};
pub use smooth::{ReadingSmoother, SmootherConfig};

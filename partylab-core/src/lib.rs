//! PartyLab Core — price tables, party labels, and the seasonality pipeline.
//!
//! This crate contains the heart of the analysis:
//! - Domain types (price tables, party label series)
//! - CSV loaders for the three input files
//! - The statistical pipeline: monthly resampling, percent change,
//!   cross-sectional averaging with an outlier clamp, party/transition
//!   binning into calendar-month buckets, and per-bucket mean/standard-error

pub mod data;
pub mod domain;
pub mod pipeline;

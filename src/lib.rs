//! Veredicto - statistical comparison of benchmark runs
//!
//! This library turns two collections of benchmark samples (control and
//! experiment) into per-phase verdicts: a Hodges-Lehmann shift estimate, a
//! rank-based confidence interval, a significance call, and chart-ready
//! summaries (quantiles, outliers, histograms, cumulative timelines).

pub mod cli;
pub mod compare;
pub mod error;
pub mod identifier;
pub mod sample;

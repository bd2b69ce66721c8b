//! Core type definitions for conformance evaluation
//!
//! This module provides the fundamental types used throughout the library:
//! - [`MeasurementContext`]: Targets and non-targets handed to every criterion
//! - [`MeasurementEntry`]: A measurement with its timepoint and image metadata
//! - [`RuleConfiguration`]: A criterion type name with its options
//! - [`RuleResult`] / [`RuleOutcome`]: Per-rule pass/fail results
//! - [`ConformanceReport`]: Aggregate of one evaluation run
//! - [`EvaluatorConfig`]: Configuration of an evaluation run

mod config;
mod context;
mod enums;
mod report;
mod result;

pub use config::{EvaluatorConfig, RuleConfiguration, DEFAULT_MAX_ENTRIES};
pub use context::{Measurement, MeasurementContext, MeasurementEntry, Timepoint};
pub use enums::{CriterionType, MeasurementKind, ModalityMethod, TimepointKind};
pub use report::ConformanceReport;
pub use result::{RuleOutcome, RuleResult};

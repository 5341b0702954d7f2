//! gradecalc-core: grade aggregation and goal-optimization engine.
//!
//! This crate defines the grade snapshot model, the validation boundary that
//! builds snapshots, and the pure engines that turn them into percentages,
//! letter grades, GPAs, required scores and GPA projections.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod projection;
pub mod report;
pub mod scale;
pub mod semester;
pub mod subject;

pub use config::EngineConfig;
pub use error::ValidationError;
pub use projection::ProgramGpaProjector;
pub use semester::SemesterGradeEngine;
pub use subject::{GoalOutcome, SubjectGradeEngine};

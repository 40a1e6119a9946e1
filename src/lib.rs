//! # gan-smoke-rs
//!
//! Scenario-driven functional smoke tests for a multi-task GAN training
//! stack.
//!
//! The harness loads a baseline nested configuration, tunes it down to an
//! abbreviated run, then executes an ordered suite of scenarios. Each
//! scenario patches a deep copy of the baseline with dotted-path overrides,
//! builds a trainer, and drives its functional-test setup/train cycle.
//! Failures are recorded per scenario without aborting the batch, and a
//! bordered console report summarizes the outcome.
//!
//! ## Features
//!
//! - **Dotted-path overrides** - patch any leaf of a schema-less YAML tree
//! - **Scenario metadata** - tracking attachment and end-to-end toggles live
//!   in explicit fields, never inside the configuration
//! - **Scoped tracking lifecycle** - one shared experiment record, deleted
//!   deterministically when the run scope ends
//! - **Mock trainer** - a feature-gated stand-in for the real training stack
//!
//! ## Quick Start (CLI)
//!
//! ```bash
//! # Run the built-in suite with the mock trainer
//! gan-smoke run
//!
//! # Keep the tracked experiment record around afterwards
//! gan-smoke run --no-delete
//!
//! # List the scenarios of a custom suite
//! gan-smoke list --suite suite.yaml
//! ```
//!
//! ## Quick Start (Library)
//!
//! ```rust
//! use gan_smoke_rs::config::{base_config, tune_for_smoke};
//! use gan_smoke_rs::mocks::trainer::MockTrainerFactory;
//! use gan_smoke_rs::runner::run_suite;
//! use gan_smoke_rs::scenario::default_suite;
//!
//! # fn main() -> gan_smoke_rs::Result<()> {
//! let mut base = base_config()?;
//! tune_for_smoke(&mut base)?;
//!
//! let report = run_suite(&MockTrainerFactory, &base, &default_suite(), None)?;
//! assert!(report.all_passed());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod paths;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod tracking;
pub mod trainer;

// Mock collaborators for running without the real training stack
#[cfg(feature = "mock-trainer")]
pub mod mocks;

pub use error::{HarnessError, Result};
pub use runner::{run_scenario, run_suite, RunOutcome, RunReport};
pub use scenario::Scenario;
pub use tracking::{Experiment, ExperimentGuard, TrackingClient};
pub use trainer::{Trainer, TrainerFactory};

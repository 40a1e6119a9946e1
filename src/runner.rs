//! Scenario execution: one trainer invocation per scenario, sequentially.
//!
//! Each scenario starts from a deep copy of the same pristine baseline, so
//! overrides never leak between scenarios. Trainer failures are contained
//! and recorded; override-path failures abort the whole batch, since they
//! mean the suite itself is broken.
//!
//! # Example
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
//! let report = run_suite(&MockTrainerFactory, &base, &default_suite(), None)?;
//! assert!(report.all_passed());
//! # Ok(())
//! # }
//! ```

use serde_yaml::Value;

use crate::error::{HarnessError, Result};
use crate::report;
use crate::scenario::{apply_overrides, Scenario};
use crate::tracking::Experiment;
use crate::trainer::TrainerFactory;

/// Outcome of one scenario. Atomic: there is no partial success.
#[derive(Debug)]
pub enum RunOutcome {
    /// The full invocation sequence completed.
    Success,
    /// Some step failed; the error is kept for reporting.
    Failure(HarnessError),
}

impl RunOutcome {
    /// Whether this outcome is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Per-scenario outcomes of a finished batch.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<RunOutcome>,
}

impl RunReport {
    /// All outcomes, in scenario order.
    #[must_use]
    pub fn outcomes(&self) -> &[RunOutcome] {
        &self.outcomes
    }

    /// Zero-based indices of the successful scenarios.
    #[must_use]
    pub fn successes(&self) -> Vec<usize> {
        self.indices(true)
    }

    /// Zero-based indices of the failed scenarios.
    #[must_use]
    pub fn failures(&self) -> Vec<usize> {
        self.indices(false)
    }

    /// Whether every scenario succeeded.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(RunOutcome::is_success)
    }

    fn indices(&self, success: bool) -> Vec<usize> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, outcome)| outcome.is_success() == success)
            .map(|(index, _)| index)
            .collect()
    }
}

/// Run one scenario against a copy of `base`.
///
/// The caller's baseline is never mutated. The trainer is built from the
/// finalized configuration, switched into functional-test mode, given the
/// end-to-end toggle, then taken through `setup` and `train` in that order.
/// Any error along that sequence is contained in the returned outcome.
///
/// # Errors
///
/// Only override-path errors propagate: a dotted key that does not resolve
/// is fatal to the batch, not a per-scenario failure.
pub fn run_scenario(
    factory: &dyn TrainerFactory,
    base: &Value,
    scenario: &Scenario,
    experiment: Option<&Experiment>,
) -> Result<RunOutcome> {
    let mut config = base.clone();
    apply_overrides(&mut config, &scenario.overrides)?;

    let experiment = if scenario.track { experiment } else { None };
    Ok(match exercise(factory, config, scenario, experiment) {
        Ok(()) => RunOutcome::Success,
        Err(err) => RunOutcome::Failure(err),
    })
}

/// The contained portion of a scenario: construction through training.
fn exercise(
    factory: &dyn TrainerFactory,
    config: Value,
    scenario: &Scenario,
    experiment: Option<&Experiment>,
) -> Result<()> {
    let mut trainer = factory.build(config, experiment)?;
    trainer.functional_test_mode();
    trainer.set_end_to_end(scenario.end_to_end);
    trainer.setup()?;
    trainer.train()
}

/// Run every scenario in order, reporting as the batch progresses.
///
/// The batch always runs to completion: a failing scenario is recorded and
/// the next one starts from the pristine baseline.
///
/// # Errors
///
/// Returns an error only for override-path failures (broken suite).
pub fn run_suite(
    factory: &dyn TrainerFactory,
    base: &Value,
    suite: &[Scenario],
    experiment: Option<&Experiment>,
) -> Result<RunReport> {
    let total = suite.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, scenario) in suite.iter().enumerate() {
        let description = scenario.description.clone().unwrap_or_else(|| {
            tracing::warn!(index, "scenario has no description");
            "WARNING: no description for scenario".to_string()
        });
        report::print_start(index, total, &description);
        report::print_overrides(scenario);

        let outcome = run_scenario(factory, base, scenario, experiment)?;
        if let RunOutcome::Failure(err) = &outcome {
            tracing::error!(index, error = %err, "scenario failed");
            report::print_failure(err);
        }
        report::print_end("Done");
        outcomes.push(outcome);
    }

    let results = RunReport { outcomes };
    report::print_summary(&results);
    Ok(results)
}

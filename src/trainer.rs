//! Trainer collaborator seam.
//!
//! The real training stack lives outside this crate; the harness only
//! depends on the narrow surface it drives during a smoke run. A trainer is
//! built per scenario from a finalized configuration and an optional
//! tracking experiment, switched into its abbreviated functional-test mode,
//! then taken through `setup` and `train`.

use serde_yaml::Value;

use crate::error::Result;
use crate::tracking::Experiment;

/// The trainer surface exercised by a smoke scenario.
pub trait Trainer {
    /// Switch the trainer into its abbreviated functional-test mode.
    fn functional_test_mode(&mut self);

    /// Toggle the auxiliary end-to-end loss path.
    fn set_end_to_end(&mut self, enabled: bool);

    /// Prepare models, data and optimizers.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration cannot be realized.
    fn setup(&mut self) -> Result<()>;

    /// Run the training loop.
    ///
    /// # Errors
    ///
    /// Returns an error when a training step fails.
    fn train(&mut self) -> Result<()>;
}

/// Builds trainers from finalized scenario configurations.
pub trait TrainerFactory {
    /// Construct a trainer for one scenario.
    ///
    /// The configuration is owned by the trainer from here on; the optional
    /// experiment is the shared tracking record of the whole run.
    ///
    /// # Errors
    ///
    /// Returns an error when construction itself fails; the runner records
    /// this as the scenario's failure.
    fn build(&self, config: Value, experiment: Option<&Experiment>) -> Result<Box<dyn Trainer>>;
}

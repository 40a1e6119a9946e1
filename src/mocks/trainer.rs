//! Mock trainer standing in for the real training stack.
//!
//! Behaves like the genuine collaborator at the seam the harness exercises:
//! construction validates the configuration shape, `setup` resolves tasks
//! and domains, and `train` walks an abbreviated loop. Invalid task codes or
//! an end-to-end request without the painter task fail the same way the real
//! stack would, which gives the harness genuine failure paths to smoke-test.

use serde_yaml::Value;

use crate::error::{HarnessError, Result};
use crate::paths::get_path;
use crate::tracking::Experiment;
use crate::trainer::{Trainer, TrainerFactory};

/// Task codes the mock stack knows: masker, segmenter, depth, painter.
const VALID_TASKS: [&str; 4] = ["m", "s", "d", "p"];

/// Domain codes the mock stack knows: real, simulated, real-flooded.
const VALID_DOMAINS: [&str; 3] = ["r", "s", "rf"];

/// Factory producing [`MockTrainer`] instances.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockTrainerFactory;

impl TrainerFactory for MockTrainerFactory {
    fn build(&self, config: Value, experiment: Option<&Experiment>) -> Result<Box<dyn Trainer>> {
        // constructor-time validation mirrors the real stack
        for path in ["tasks", "domains", "train.epochs"] {
            if get_path(&config, path).is_none() {
                return Err(HarnessError::Trainer(format!(
                    "configuration has no `{path}`"
                )));
            }
        }
        Ok(Box::new(MockTrainer {
            config,
            experiment_key: experiment.map(|exp| exp.key.clone()),
            functional_test: false,
            end_to_end: false,
            tasks: Vec::new(),
            ready: false,
        }))
    }
}

/// Simulated trainer driven by the configuration tree alone.
pub struct MockTrainer {
    config: Value,
    experiment_key: Option<String>,
    functional_test: bool,
    end_to_end: bool,
    tasks: Vec<String>,
    ready: bool,
}

impl MockTrainer {
    fn string_list(&self, path: &str) -> Result<Vec<String>> {
        let items = get_path(&self.config, path)
            .and_then(Value::as_sequence)
            .ok_or_else(|| HarnessError::Trainer(format!("`{path}` is not a list")))?;
        items
            .iter()
            .map(|item| {
                item.as_str().map(ToString::to_string).ok_or_else(|| {
                    HarnessError::Trainer(format!("`{path}` entries must be strings"))
                })
            })
            .collect()
    }

    fn steps_per_epoch(&self) -> u64 {
        let max_samples = get_path(&self.config, "data.max_samples")
            .and_then(Value::as_u64)
            .unwrap_or(1);
        let batch_size = get_path(&self.config, "data.loaders.batch_size")
            .and_then(Value::as_u64)
            .unwrap_or(1)
            .max(1);
        max_samples.div_ceil(batch_size).max(1)
    }
}

impl Trainer for MockTrainer {
    fn functional_test_mode(&mut self) {
        self.functional_test = true;
    }

    fn set_end_to_end(&mut self, enabled: bool) {
        self.end_to_end = enabled;
    }

    fn setup(&mut self) -> Result<()> {
        let tasks = self.string_list("tasks")?;
        let domains = self.string_list("domains")?;

        if tasks.is_empty() {
            return Err(HarnessError::Trainer("no tasks to train".to_string()));
        }
        for task in &tasks {
            if !VALID_TASKS.contains(&task.as_str()) {
                return Err(HarnessError::Trainer(format!("unknown task code `{task}`")));
            }
        }
        for domain in &domains {
            if !VALID_DOMAINS.contains(&domain.as_str()) {
                return Err(HarnessError::Trainer(format!(
                    "unknown domain code `{domain}`"
                )));
            }
        }

        tracing::debug!(?tasks, ?domains, "mock trainer ready");
        self.tasks = tasks;
        self.ready = true;
        Ok(())
    }

    fn train(&mut self) -> Result<()> {
        if !self.ready {
            return Err(HarnessError::Trainer(
                "train() called before setup()".to_string(),
            ));
        }
        if self.end_to_end && !self.tasks.iter().any(|task| task == "p") {
            return Err(HarnessError::Trainer(
                "end-to-end loss requires the painter task".to_string(),
            ));
        }

        let mut epochs = get_path(&self.config, "train.epochs")
            .and_then(Value::as_u64)
            .ok_or_else(|| HarnessError::Trainer("`train.epochs` is not an integer".to_string()))?;
        let mut steps = self.steps_per_epoch();
        if self.functional_test {
            epochs = epochs.min(1);
            steps = steps.min(2);
        }

        for epoch in 0..epochs {
            for step in 0..steps {
                tracing::debug!(epoch, step, tasks = ?self.tasks, "mock training step");
            }
        }
        if let Some(key) = &self.experiment_key {
            tracing::info!(key, "mock metrics logged to tracked experiment");
        }
        Ok(())
    }
}

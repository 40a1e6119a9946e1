//! Experiment-tracking service client and teardown guard.
//!
//! One experiment record is created before any scenario runs and shared by
//! every scenario that opts in. Deletion is scoped, not hooked: an
//! [`ExperimentGuard`] owns an administrative client and removes the record
//! when it goes out of scope, on every exit path. `--no-delete` disarms it.
//!
//! Credentials come from the environment: `TRACKING_API_KEY` authenticates
//! creation, `TRACKING_REST_API_KEY` the administrative delete client, and
//! `TRACKING_BASE_URL` overrides the endpoint. Without an API key the
//! harness runs untracked.

use serde::Deserialize;

use crate::error::{HarnessError, Result};

/// Environment variable holding the regular API key.
pub const API_KEY_ENV: &str = "TRACKING_API_KEY";

/// Environment variable holding the administrative (REST) API key.
pub const REST_API_KEY_ENV: &str = "TRACKING_REST_API_KEY";

/// Environment variable overriding the service endpoint.
pub const BASE_URL_ENV: &str = "TRACKING_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api/v1";

/// Opaque handle to a remote experiment record.
#[derive(Debug, Clone)]
pub struct Experiment {
    /// Service-assigned experiment key.
    pub key: String,
    /// Project the experiment was created under.
    pub project: String,
}

#[derive(Deserialize)]
struct CreateResponse {
    key: String,
}

/// Blocking JSON client for the tracking service.
#[derive(Debug, Clone)]
pub struct TrackingClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl TrackingClient {
    /// Create a client against an explicit endpoint.
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Build a client from the environment, or `None` when no API key is
    /// set (the harness then runs untracked).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok()?;
        Some(Self::new(&base_url_from_env(), &api_key))
    }

    /// Build the administrative client used for deletion.
    ///
    /// Falls back to the regular API key with a warning when the REST key is
    /// not set.
    #[must_use]
    pub fn admin_from_env() -> Option<Self> {
        let api_key = match std::env::var(REST_API_KEY_ENV) {
            Ok(key) => key,
            Err(_) => {
                tracing::warn!(
                    "{REST_API_KEY_ENV} not set; deleting with the regular API key"
                );
                std::env::var(API_KEY_ENV).ok()?
            }
        };
        Some(Self::new(&base_url_from_env(), &api_key))
    }

    /// Create an experiment record under `project`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// response without an experiment key.
    pub fn create_experiment(&self, project: &str, display_summary_level: u8) -> Result<Experiment> {
        let response = self
            .http
            .post(format!("{}/experiments", self.base_url))
            .header("Authorization", &self.api_key)
            .json(&serde_json::json!({
                "project_name": project,
                "display_summary_level": display_summary_level,
            }))
            .send()?
            .error_for_status()?;

        let created: CreateResponse = response.json()?;
        if created.key.is_empty() {
            return Err(HarnessError::Tracking(
                "service returned an empty experiment key".to_string(),
            ));
        }
        Ok(Experiment {
            key: created.key,
            project: project.to_string(),
        })
    }

    /// Delete the experiment record identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub fn delete_experiment(&self, key: &str) -> Result<()> {
        self.http
            .delete(format!("{}/experiments/{key}", self.base_url))
            .header("Authorization", &self.api_key)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

fn base_url_from_env() -> String {
    std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Scoped owner of the shared experiment record.
///
/// Deletes the record when dropped unless [`keep`](Self::keep) was called.
/// Deletion at drop time is best effort: failures are logged and swallowed.
pub struct ExperimentGuard {
    client: TrackingClient,
    experiment: Experiment,
    delete_on_drop: bool,
}

impl ExperimentGuard {
    /// Take ownership of an experiment record, armed for deletion.
    #[must_use]
    pub fn new(client: TrackingClient, experiment: Experiment) -> Self {
        Self {
            client,
            experiment,
            delete_on_drop: true,
        }
    }

    /// Disarm the guard: the record survives the run.
    pub fn keep(&mut self) {
        self.delete_on_drop = false;
    }

    /// Whether the guard will delete the record on drop.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.delete_on_drop
    }

    /// The experiment this guard owns.
    #[must_use]
    pub fn experiment(&self) -> &Experiment {
        &self.experiment
    }
}

impl Drop for ExperimentGuard {
    fn drop(&mut self) {
        if !self.delete_on_drop {
            return;
        }
        tracing::info!(key = %self.experiment.key, "deleting tracked experiment");
        if let Err(err) = self.client.delete_experiment(&self.experiment.key) {
            tracing::warn!(
                key = %self.experiment.key,
                error = %err,
                "failed to delete tracked experiment"
            );
        }
    }
}

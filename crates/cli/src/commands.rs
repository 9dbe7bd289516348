use common::OperationTimer;
use domain::config::AppConfig;
use domain::{DomainError, DomainResult, UserService};
use infrastructure::InMemoryUserRepository;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_FIRST_NAME: &str = "Ana";
pub const DEFAULT_LAST_NAME: &str = "Weidner";

/// Result of saving one value through the service
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(String),
    /// The repository answered `false`
    Rejected(String),
    Failed { value: String, error: DomainError },
}

impl SaveOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SaveOutcome::Failed { .. })
    }
}

impl fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveOutcome::Saved(value) => write!(f, "{}: saved", value),
            SaveOutcome::Rejected(value) => write!(f, "{}: not saved", value),
            SaveOutcome::Failed { value, error } => write!(f, "{}: error: {}", value, error),
        }
    }
}

/// A service over an in-memory repository built from the loaded configuration
pub struct UserApp {
    service: UserService<InMemoryUserRepository>,
}

impl UserApp {
    pub fn new(config: &AppConfig) -> Self {
        let repository = InMemoryUserRepository::new(config.repository.clone());
        let service = UserService::new(Arc::new(repository));
        info!(profile = config.profile.name(), "User service initialized");

        Self { service }
    }

    pub fn concat(&self, first: &str, second: &str) -> DomainResult<String> {
        let timer = OperationTimer::new("concatenate");
        let result = self.service.concatenate(Some(first), Some(second));
        timer.finish_with_result(&result);
        result
    }

    /// Save each value in order. A failure does not stop the remaining saves.
    pub fn save_all(&self, values: &[String]) -> Vec<SaveOutcome> {
        let mut timer = OperationTimer::new("save_all");
        timer.add_field("items_count", values.len());

        let outcomes = values
            .iter()
            .map(|value| match self.service.save_on_database(value) {
                Ok(true) => SaveOutcome::Saved(value.clone()),
                Ok(false) => SaveOutcome::Rejected(value.clone()),
                Err(error) => SaveOutcome::Failed {
                    value: value.clone(),
                    error,
                },
            })
            .collect::<Vec<_>>();

        debug!(stored = self.service.repository().len(), "Save batch finished");
        timer.finish();
        outcomes
    }

    /// Values currently held by the repository
    pub fn stored(&self) -> Vec<String> {
        self.service.repository().values()
    }
}

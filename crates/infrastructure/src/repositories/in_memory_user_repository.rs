use domain::config::RepositoryConfig;
use domain::{DomainError, DomainResult, UserRepository};
use parking_lot::RwLock;
use tracing::{debug, warn};

/// Process-local user store, values kept in insertion order.
///
/// `save` answers `false` when the policy in [`RepositoryConfig`] declines a
/// value (duplicate while duplicates are disallowed, or capacity reached).
/// Values longer than `max_value_length` are an error.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    config: RepositoryConfig,
    values: RwLock<Vec<String>>,
}

impl InMemoryUserRepository {
    pub fn new(config: RepositoryConfig) -> Self {
        Self {
            config,
            values: RwLock::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.read().iter().any(|stored| stored == value)
    }

    /// Snapshot of stored values
    pub fn values(&self) -> Vec<String> {
        self.values.read().clone()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(RepositoryConfig::default())
    }
}

impl UserRepository for InMemoryUserRepository {
    fn save(&self, value: &str) -> DomainResult<bool> {
        if value.len() > self.config.max_value_length {
            return Err(DomainError::InvalidValue(format!(
                "value is {} bytes, maximum is {}",
                value.len(),
                self.config.max_value_length
            )));
        }

        let mut values = self.values.write();

        if !self.config.allow_duplicates && values.iter().any(|stored| stored == value) {
            debug!(value, "duplicate value declined");
            return Ok(false);
        }

        if let Some(capacity) = self.config.capacity {
            if values.len() >= capacity {
                warn!(value, capacity, "repository full, value declined");
                return Ok(false);
            }
        }

        values.push(value.to_string());
        debug!(value, stored = values.len(), "value saved");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_appends_in_order() {
        let repository = InMemoryUserRepository::default();
        assert!(repository.is_empty());

        assert_eq!(repository.save("Ana"), Ok(true));
        assert_eq!(repository.save(""), Ok(true));
        assert_eq!(repository.save("Ana"), Ok(true));

        assert_eq!(repository.values(), vec!["Ana", "", "Ana"]);
        assert!(repository.contains(""));
    }

    #[test]
    fn test_duplicates_can_be_declined() {
        let repository = InMemoryUserRepository::new(RepositoryConfig {
            allow_duplicates: false,
            ..RepositoryConfig::default()
        });

        assert_eq!(repository.save("AnaWeidner"), Ok(true));
        assert_eq!(repository.save("AnaWeidner"), Ok(false));
        assert_eq!(repository.len(), 1);
    }

    #[test]
    fn test_capacity_declines_overflow() {
        let repository = InMemoryUserRepository::new(RepositoryConfig {
            capacity: Some(1),
            ..RepositoryConfig::default()
        });

        assert_eq!(repository.save("a"), Ok(true));
        assert_eq!(repository.save("b"), Ok(false));
        assert_eq!(repository.values(), vec!["a"]);
    }

    #[test]
    fn test_oversized_value_is_an_error() {
        let repository = InMemoryUserRepository::new(RepositoryConfig {
            max_value_length: 3,
            ..RepositoryConfig::default()
        });

        assert_eq!(repository.save("abc"), Ok(true));
        let err = repository.save("abcd").unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue(_)));
        assert!(err.is_validation_error());
        assert_eq!(repository.len(), 1);
    }
}

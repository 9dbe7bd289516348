//! The real repository behind the service, plain and spied on

use domain::config::RepositoryConfig;
use domain::testing::{mock_repository, spy_repository};
use domain::{DomainError, UserRepository, UserService};
use doubles::{any, eq, times};
use infrastructure::InMemoryUserRepository;
use std::sync::Arc;

#[test]
fn service_persists_through_real_repository() {
    let repository = Arc::new(InMemoryUserRepository::default());
    let service = UserService::new(Arc::clone(&repository));

    let full_name = service
        .concatenate(Some("Ana"), Some("Weidner"))
        .expect("valid names");

    assert_eq!(service.save_on_database(&full_name), Ok(true));
    assert_eq!(repository.values(), vec!["AnaWeidner".to_string()]);
}

#[test]
fn spy_applies_real_side_effects_while_mock_does_not() {
    let storage = Arc::new(InMemoryUserRepository::new(RepositoryConfig {
        allow_duplicates: false,
        ..RepositoryConfig::default()
    }));
    let spy = spy_repository(Arc::clone(&storage));
    let mock = mock_repository();

    let mut answers = Vec::new();
    for double in [&spy, &mock] {
        let service = UserService::new(Arc::clone(double));
        answers.push(service.save_on_database("AnaWeidner"));
        answers.push(service.save_on_database("AnaWeidner"));
    }

    // Identical call records
    assert!(spy.verify("save", &[eq("AnaWeidner")], times(2)));
    assert!(mock.verify("save", &[eq("AnaWeidner")], times(2)));

    // Spy answers come from the real duplicate policy, mock answers are zero values
    assert_eq!(answers, vec![Ok(true), Ok(false), Ok(false), Ok(false)]);
    assert_eq!(storage.values(), vec!["AnaWeidner".to_string()]);
    assert!(mock.inspect(|_| ()).is_none());
}

#[test]
fn real_repository_can_be_used_through_the_contract() {
    let repository: Box<dyn UserRepository> = Box::new(InMemoryUserRepository::default());

    assert_eq!(repository.save(""), Ok(true));
}

#[test]
fn spy_propagates_repository_errors_unchanged() {
    let spy = spy_repository(InMemoryUserRepository::new(RepositoryConfig {
        max_value_length: 4,
        ..RepositoryConfig::default()
    }));
    let service = UserService::new(Arc::clone(&spy));

    let result = service.save_on_database("AnaWeidner");

    assert!(matches!(result, Err(DomainError::InvalidValue(_))));
    assert!(spy.verify("save", &[any()], times(1)));
}

mod mocks;

use collaborator_form::domain::{CollaboratorId, Cpf, EmailAddress, PhoneNumber};
use collaborator_form::error::ApiError;
use collaborator_form::models::{Collaborator, NewCollaborator};
use collaborator_form::repositories::CollaboratorRepository;
use mocks::MockCollaboratorRepository;

fn sample_collaborator(id: u64, name: &str) -> Collaborator {
    Collaborator {
        id: Some(CollaboratorId::new(id).unwrap()),
        name: name.to_string(),
        email: "someone@example.com".to_string(),
        cpf: 52998224725,
        phone: 11987654321,
        address: "Rua Teste 123".to_string(),
    }
}

fn sample_new(name: &str) -> NewCollaborator {
    NewCollaborator {
        name: name.to_string(),
        email: EmailAddress::new("new@example.com").unwrap(),
        phone: PhoneNumber::new("11987654321").unwrap(),
        address: "Rua Teste 123".to_string(),
        cpf: Cpf::new("52998224725").unwrap(),
    }
}

fn id(n: u64) -> CollaboratorId {
    CollaboratorId::new(n).unwrap()
}

#[tokio::test]
async fn test_mock_repository_get() {
    let repo = MockCollaboratorRepository::new();
    repo.add_collaborator(sample_collaborator(123, "John Doe"));

    let result = repo.get(id(123)).await.unwrap();
    assert_eq!(result.name, "John Doe");
    assert_eq!(repo.get_call_count("get"), 1);
}

#[tokio::test]
async fn test_mock_repository_get_not_found() {
    let repo = MockCollaboratorRepository::new();
    let result = repo.get(id(404)).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_mock_repository_create() {
    let repo = MockCollaboratorRepository::new();

    let first = repo.create(&sample_new("First Person")).await.unwrap();
    let second = repo.create(&sample_new("Second Person")).await.unwrap();
    assert_eq!(first.id, Some(id(1)));
    assert_eq!(second.id, Some(id(2)));

    // Verify it was actually stored
    let stored = repo.get(id(2)).await.unwrap();
    assert_eq!(stored.name, "Second Person");
    assert_eq!(repo.created().len(), 2);
}

#[tokio::test]
async fn test_mock_repository_failures() {
    let repo = MockCollaboratorRepository::new();
    repo.add_collaborator(sample_collaborator(1, "Jane"));

    repo.fail_creates_with("CPF já cadastrado");
    let err = repo.create(&sample_new("Jane")).await.unwrap_err();
    assert_eq!(err.user_message(), "CPF já cadastrado");

    repo.fail_gets();
    let err = repo.get(id(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::ApiError { status: 500, .. }));
}

#[tokio::test]
async fn test_call_count_tracking() {
    let repo = MockCollaboratorRepository::new();
    repo.add_collaborator(sample_collaborator(123, "Test User"));

    assert_eq!(repo.get_call_count("get"), 0);

    repo.get(id(123)).await.unwrap();
    assert_eq!(repo.get_call_count("get"), 1);

    repo.get(id(123)).await.unwrap();
    assert_eq!(repo.get_call_count("get"), 2);
    assert_eq!(repo.get_call_count("create"), 0);
}

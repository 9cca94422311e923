mod api_collaborator_repository;
mod traits;

pub use api_collaborator_repository::ApiCollaboratorRepository;
pub use traits::CollaboratorRepository;

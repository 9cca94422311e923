pub mod mock_collaborator_repository;
pub mod recording_sinks;

pub use mock_collaborator_repository::MockCollaboratorRepository;
pub use recording_sinks::{RecordingNavigator, RecordingNotifier};

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Cycle {0} is already finalized")]
    AlreadyFinalized(Uuid),

    #[error("Cycle {0} violates its lifecycle invariant: {1}")]
    InconsistentCycle(Uuid, String),
}

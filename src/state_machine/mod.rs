// State machine module for operation records
//
// Each record moves pending -> processing -> completed | failed. Transitions are
// validated here so the runner never has to reason about illegal moves inline.

pub mod errors;
pub mod events;
pub mod record_state_machine;
pub mod states;

// Re-export main types for convenient access
pub use errors::{StateMachineError, StateMachineResult};
pub use events::RecordEvent;
pub use record_state_machine::RecordStateMachine;
pub use states::RecordState;

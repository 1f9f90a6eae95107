//! Enumerated types.

mod failure_policy;
mod persona_state;

pub use failure_policy::FailurePolicy;
pub use persona_state::PersonaState;

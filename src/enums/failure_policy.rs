/// What to do when Steam rejects a Steam Guard code that was already known to the session.
/// Retrying a known-bad code is pointless, so the session stops either way.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Exit the process with [`crate::INVALID_STEAM_GUARD_CODE_EXIT_CODE`]. This is the default.
    #[default]
    Exit,
    /// Move the session into its failed state and return
    /// [`crate::error::AuthenticationError::InvalidSteamGuardCode`] to every caller waiting on
    /// the session, leaving the decision to the caller.
    Surface,
}

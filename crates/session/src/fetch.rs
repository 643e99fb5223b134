//! Tri-state fetch lifecycle.

/// Lifecycle of one fetched resource: not asked for yet, in flight,
/// arrived, or failed with a user-facing message.
///
/// A flag, not a protocol; nothing here retries or times out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T = ()> {
    /// No fetch has been issued yet.
    #[default]
    Idle,

    /// A fetch is in flight; a re-entrant fetch is ignored.
    Loading,

    /// The last fetch succeeded.
    Loaded(T),

    /// The last fetch failed; the message is shown inline.
    Failed(String),
}

impl<T> FetchState<T> {
    /// Returns true before the first fetch.
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    /// Returns true while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Returns true once a fetch has succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchState::Loaded(_))
    }

    /// Returns true after a failed fetch.
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    /// Returns the loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

//! Recoverable error conditions reported by screen groups.

use thiserror::Error;

use crate::group::ScreenId;

/// A recoverable condition hit by a [`ScreenGroup`](crate::ScreenGroup)
/// operation.
///
/// Every condition is logged through the `log` facade and also returned to
/// the caller. None of them leave the group partially mutated: the operation
/// either changed nothing or applied the documented fallback before
/// returning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    /// An id was registered twice; the group kept the original screen.
    #[error("screen `{0}` is already registered")]
    DuplicateRegistration(ScreenId),

    /// The id is not registered in this group.
    #[error("screen `{0}` is not registered in this group")]
    UnknownScreen(ScreenId),

    /// A multi-screen show was requested on a group that only allows one
    /// shown screen.
    #[error("cannot show {requested} screens at once: group allows a single shown screen")]
    InvalidConfiguration {
        /// How many screens the rejected request named
        requested: usize,
    },

    /// More back-steps were requested than the history holds; the group
    /// restored the deepest reachable entry (or hid everything).
    #[error("cannot go back {requested} steps: history holds {depth} entries")]
    HistoryUnderflow {
        /// Requested number of back-steps
        requested: usize,
        /// History depth when the request was made
        depth: usize,
    },
}

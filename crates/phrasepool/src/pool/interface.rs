use crate::{IssueStatus, Result};
use core::fmt;

/// The issuance contract shared by every pool.
///
/// A pool hands out phrases without replacement: once a phrase has been
/// returned in [`IssueStatus::Ready`], the same pool will not return it again
/// until it is reset.
pub trait PhrasePool {
    type Err: fmt::Debug;

    /// Issues the next phrase, or reports depletion.
    ///
    /// # Errors
    /// - Pool specific. Pools that cannot fail use
    ///   [`Infallible`](core::convert::Infallible).
    fn try_issue_next(&self) -> Result<IssueStatus, Self::Err>;
}

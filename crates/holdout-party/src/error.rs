//! Error types for the holdout-party crate.
//!
//! These are the member-level rejections a caller can receive when asking a
//! survivor to do something. None of them leave the roster modified.

use holdout_types::MemberId;

/// Errors that can occur when addressing or commanding a party member.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartyError {
    /// No living member has the given ID.
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),

    /// The member is resting or still committed to an earlier action.
    #[error("{name} is busy")]
    MemberBusy {
        /// Name of the busy member.
        name: String,
    },

    /// The member has no energy left for anything but eating, drinking or sleeping.
    #[error("{name} is too exhausted to work")]
    MemberExhausted {
        /// Name of the exhausted member.
        name: String,
    },

    /// Every name in the pool has already been used this run.
    #[error("no unused survivor names remain")]
    NoNamesLeft,

    /// No member is idle to take an auto-assigned action.
    #[error("nobody is available")]
    NobodyAvailable,
}

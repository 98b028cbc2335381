//! fragment orchestrator library.
//!
//! Wires the collaborators together: archive the payload, encrypt it to a
//! single-use age identity, split the identity's secret material into
//! shares, and seal one envelope per shareholder — plus the inverse.
//!
//! The binary in `main.rs` is a thin clap layer over [`encrypt`] and
//! [`decrypt`].

pub mod decrypt;
pub mod encrypt;
pub mod identity;

pub use decrypt::decrypt;
pub use encrypt::encrypt;

use fragment_archive::ArchiveError;
use fragment_envelope::EnvelopeError;
use fragment_shamir::ShamirError;
use thiserror::Error;

/// Artifact file name for share `i` (1-based)
pub fn fragment_file_name(i: usize) -> String {
    format!("share-{i}.fragment")
}

#[derive(Error, Debug)]
pub enum FragmentError {
    /// Supplied artifacts do not agree on payload and metadata, so they
    /// cannot all come from one split operation.
    #[error("shares do not originate from the same encrypt operation")]
    InconsistentShares,
    #[error("not enough shares: {have} supplied, {need} required")]
    InsufficientShares { have: usize, need: usize },
    #[error("too many shares: {have} supplied, only {max} were issued")]
    TooManyShares { have: usize, max: usize },
    /// Combine succeeded arithmetically but the result is not the identity
    /// that encrypted the payload — wrong or foreign shares were mixed in,
    /// or a below-threshold set slipped past the metadata (e.g. forged
    /// metadata).
    #[error("shares combined but the recovered identity cannot decrypt the payload")]
    ReconstructionFailure,
    #[error(transparent)]
    Shamir(#[from] ShamirError),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error(transparent)]
    Identity(#[from] identity::IdentityError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

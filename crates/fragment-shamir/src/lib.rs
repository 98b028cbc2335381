//! Fragment Shamir Module
//!
//! Split and reconstruct byte secrets using Shamir's Secret Sharing over
//! GF(256).
//!
//! Shares use the raw wire format carried inside fragment artifacts: for a
//! secret of L bytes, each share is L+1 bytes — L polynomial evaluations
//! (all at the same x-coordinate) followed by a trailing x-coordinate byte
//! in 1..=255. x = 0 is reserved for the secret itself (the interpolation
//! target) and never appears in a share.
//!
//! # Example
//!
//! ```
//! use fragment_shamir::{combine, split};
//!
//! let secret = b"identity secret material";
//!
//! // Split into 3-of-5 shares
//! let shares = split(secret, 5, 3).unwrap();
//! assert_eq!(shares.len(), 5);
//!
//! // Any 3 shares recover the secret
//! let subset = vec![shares[0].clone(), shares[2].clone(), shares[4].clone()];
//! assert_eq!(combine(&subset).unwrap(), secret);
//! ```
//!
//! `combine` does not know the original threshold; feeding it fewer shares
//! than were required at split time yields a wrong secret, not an error.
//! Callers hold the threshold (fragment records it in share metadata) and
//! must enforce it before combining.

pub mod gf256;
pub mod poly;
pub mod shamir;

// Re-exports
pub use shamir::{combine, split, split_with_rng, validate_params};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShamirError {
    #[error("invalid threshold: must be at least 2, at most 255, and not exceed the share count")]
    InvalidThreshold,
    #[error("invalid number of shares: must be at least the threshold and at most 255")]
    InvalidNumShares,
    #[error("invalid secret: must not be empty")]
    InvalidSecret,
    #[error("shares have mismatched lengths")]
    MismatchedShareLength,
    #[error("duplicate share x-coordinate: {0}")]
    DuplicateShare(u8),
}

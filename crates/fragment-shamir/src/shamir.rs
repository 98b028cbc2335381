//! Split and combine over the raw trailing-x share format.
//!
//! A share for an L-byte secret is L+1 bytes: one polynomial evaluation per
//! secret byte (all at this share's x-coordinate) followed by the
//! x-coordinate itself. x runs densely 1..=n in issue order, so the i-th
//! returned share carries x = i+1.

use crate::gf256::poly_eval;
use crate::poly::{interpolate, make_polynomial};
use crate::ShamirError;
use rand::{CryptoRng, RngCore};

/// Check split parameters without splitting anything.
///
/// The CLI calls this before doing any expensive work so a bad
/// `--shares`/`--threshold` pair fails before the payload is encrypted.
pub fn validate_params(shares: usize, threshold: usize) -> Result<(), ShamirError> {
    if threshold < 2 || threshold > 255 || threshold > shares {
        return Err(ShamirError::InvalidThreshold);
    }
    if shares < threshold || shares > 255 {
        return Err(ShamirError::InvalidNumShares);
    }
    Ok(())
}

/// Split a secret into `shares` shares, any `threshold` of which
/// reconstruct it.
///
/// Draws polynomial coefficients from the thread-local CSPRNG. See
/// [`split_with_rng`] for the injectable-randomness variant.
pub fn split(secret: &[u8], shares: usize, threshold: usize) -> Result<Vec<Vec<u8>>, ShamirError> {
    split_with_rng(secret, shares, threshold, &mut rand::thread_rng())
}

/// Split with a caller-supplied randomness source.
///
/// For each secret byte, builds one random polynomial of degree
/// `threshold - 1` with that byte as the constant term and evaluates it at
/// x = 1..=shares. Every call must use fresh randomness; reusing a
/// coefficient stream across splits voids the threshold guarantee.
pub fn split_with_rng<R: RngCore + CryptoRng>(
    secret: &[u8],
    shares: usize,
    threshold: usize,
    rng: &mut R,
) -> Result<Vec<Vec<u8>>, ShamirError> {
    validate_params(shares, threshold)?;
    if secret.is_empty() {
        return Err(ShamirError::InvalidSecret);
    }

    let mut out: Vec<Vec<u8>> = (0..shares)
        .map(|_| Vec::with_capacity(secret.len() + 1))
        .collect();

    for &secret_byte in secret {
        let coefficients = make_polynomial(secret_byte, threshold - 1, rng);
        for (i, share) in out.iter_mut().enumerate() {
            let x = (i + 1) as u8;
            share.push(poly_eval(&coefficients, x));
        }
    }

    for (i, share) in out.iter_mut().enumerate() {
        share.push((i + 1) as u8);
    }

    Ok(out)
}

/// Reconstruct a secret from raw shares.
///
/// Needs at least 2 shares of equal length with distinct trailing
/// x-coordinates. Each secret byte is recovered by interpolating the
/// per-position points at x = 0.
///
/// This function does **not** know the threshold the secret was split
/// with: handing it fewer shares than that threshold succeeds and returns
/// a mathematically consistent but wrong secret. The caller owns the
/// threshold check (fragment's decrypt flow compares the supplied count
/// against the threshold recorded in share metadata before calling this).
pub fn combine(shares: &[Vec<u8>]) -> Result<Vec<u8>, ShamirError> {
    if shares.len() < 2 {
        return Err(ShamirError::InvalidNumShares);
    }

    // All shares must agree on length, and must carry at least one secret
    // byte next to the coordinate byte.
    let share_len = shares[0].len();
    if share_len < 2 {
        return Err(ShamirError::InvalidSecret);
    }
    if shares.iter().any(|s| s.len() != share_len) {
        return Err(ShamirError::MismatchedShareLength);
    }

    // Duplicate x-coordinates make interpolation undefined; reject loudly
    // rather than divide by zero.
    let mut seen = [false; 256];
    for share in shares {
        let x = share[share_len - 1];
        if seen[x as usize] {
            return Err(ShamirError::DuplicateShare(x));
        }
        seen[x as usize] = true;
    }

    let secret_len = share_len - 1;
    let mut secret = Vec::with_capacity(secret_len);
    for byte_idx in 0..secret_len {
        let points: Vec<(u8, u8)> = shares
            .iter()
            .map(|s| (s[share_len - 1], s[byte_idx]))
            .collect();
        secret.push(interpolate(&points, 0));
    }

    Ok(secret)
}

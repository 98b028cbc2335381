//! Decrypt flow: open envelopes → consistency and bounds checks → combine
//! → decrypt payload.
//!
//! Every failure aborts loudly. The share-count bounds are enforced here —
//! before combine — because `combine` itself cannot detect an
//! under-threshold set (it would return a plausible wrong secret).

use crate::{identity, FragmentError};
use fragment_envelope::ShareRecord;
use fragment_shamir::{combine, ShamirError};
use std::path::{Path, PathBuf};
use zeroize::Zeroize;

/// Recover the payload archive from share artifacts and write it to
/// `output` as a tar.gz.
pub fn decrypt(fragments: &[PathBuf], output: &Path) -> Result<(), FragmentError> {
    if fragments.is_empty() {
        return Err(ShamirError::InvalidNumShares.into());
    }

    let mut records: Vec<ShareRecord> = Vec::with_capacity(fragments.len());
    for path in fragments {
        log::debug!("Decoding {}", path.display());
        let data = std::fs::read(path)?;
        records.push(fragment_envelope::decode(&data)?);
    }

    // All artifacts must stem from the same split operation: identical
    // payload and identical (count, threshold) metadata.
    let first = &records[0];
    if records[1..].iter().any(|r| {
        r.encrypted_blob != first.encrypted_blob
            || r.share_count != first.share_count
            || r.share_threshold != first.share_threshold
    }) {
        return Err(FragmentError::InconsistentShares);
    }

    // Bounds check before combine; combine itself cannot tell.
    if records.len() < first.share_threshold {
        return Err(FragmentError::InsufficientShares {
            have: records.len(),
            need: first.share_threshold,
        });
    }
    if records.len() > first.share_count {
        return Err(FragmentError::TooManyShares {
            have: records.len(),
            max: first.share_count,
        });
    }

    log::info!(
        "Combining {} of {} shares (threshold {})",
        records.len(),
        first.share_count,
        first.share_threshold
    );
    let shamir_keys: Vec<Vec<u8>> = records.iter().map(|r| r.shamir_key.clone()).collect();
    let mut secret = combine(&shamir_keys)?;

    let parsed = identity::from_secret_bytes(&secret);
    secret.zeroize();
    let recovered = parsed.map_err(|_| FragmentError::ReconstructionFailure)?;

    let archive = identity::decrypt(&recovered, &records[0].encrypted_blob)
        .map_err(|_| FragmentError::ReconstructionFailure)?;

    std::fs::write(output, &archive)?;
    log::info!("Recovered archive written to {}", output.display());
    Ok(())
}

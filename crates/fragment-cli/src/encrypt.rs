//! Encrypt flow: archive → encrypt-to-identity → split → seal envelopes.

use crate::{fragment_file_name, identity, FragmentError};
use fragment_envelope::ShareRecord;
use fragment_shamir::{split, validate_params};
use std::path::{Path, PathBuf};
use zeroize::Zeroize;

/// Encrypt `path` (a file or a directory walked recursively) into
/// `shares` sealed artifacts under `output_dir`, any `threshold` of which
/// recover it.
///
/// Returns the written artifact paths, `share-1.fragment` ..
/// `share-<n>.fragment`. A failure part-way can leave earlier artifacts on
/// disk; artifacts are regenerated, never patched, so rerunning is safe.
pub fn encrypt(
    path: &Path,
    shares: usize,
    threshold: usize,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, FragmentError> {
    // Fail on bad parameters before touching the payload
    validate_params(shares, threshold)?;

    log::info!("Archiving {}", path.display());
    let archive = fragment_archive::archive_path(path)?;

    let identity = identity::generate();
    let encrypted_blob = identity::encrypt(&identity.to_public(), &archive)?;
    log::debug!(
        "Payload encrypted: {} bytes archived, {} bytes sealed",
        archive.len(),
        encrypted_blob.len()
    );

    let mut secret = identity::secret_bytes(&identity);
    let split_result = split(&secret, shares, threshold);
    secret.zeroize();
    let shamir_keys = split_result?;

    let mut written = Vec::with_capacity(shares);
    for (i, shamir_key) in shamir_keys.into_iter().enumerate() {
        let record = ShareRecord {
            shamir_key,
            encrypted_blob: encrypted_blob.clone(),
            share_count: shares,
            share_threshold: threshold,
        };

        let bytes = fragment_envelope::encode(&record)?;
        let out = output_dir.join(fragment_file_name(i + 1));
        std::fs::write(&out, &bytes)?;
        log::info!("Wrote {}", out.display());
        written.push(out);
    }

    Ok(written)
}

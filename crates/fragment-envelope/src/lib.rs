//! Fragment Envelope Module
//!
//! The self-describing container each shareholder receives. One envelope
//! carries one reconstruction share, the (identical) encrypted payload and
//! the split metadata, archived together and sealed with a fresh symmetric
//! key.
//!
//! On-disk layout: `[key (32 bytes)][sealed archive]`.
//!
//! # Known property, not a security guarantee
//!
//! The envelope's own symmetric key sits **in the clear** directly ahead of
//! its ciphertext, so anyone holding an artifact can open its outer layer.
//! This layer therefore contributes tamper evidence (AEAD authenticity)
//! only; confidentiality of the payload comes entirely from the inner
//! asymmetric encryption of `MANIFEST.age`. This matches the issued
//! artifact format and must not be "fixed" without breaking compatibility.

pub mod sealed;

use fragment_archive::{create_archive, read_archive, FileEntry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use sealed::KEY_LEN;

/// Entry name for the asymmetrically encrypted payload
const MANIFEST_ENTRY: &str = "MANIFEST.age";
/// Entry name for the raw Shamir share bytes
const SHARE_ENTRY: &str = "SHARE.txt";
/// Entry name for the JSON split metadata
const META_ENTRY: &str = "metadata.json";

#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("failed to encode envelope: {0}")]
    Encode(String),
    /// Covers every way an envelope can fail to decode: truncation, AEAD
    /// authenticity failure, a broken archive, a missing entry or
    /// unparseable metadata. Tampered and truncated inputs are deliberately
    /// not distinguished; both are untrusted.
    #[error("invalid or corrupted envelope")]
    Decode,
}

/// The unit carried between split and seal: one share plus everything a
/// shareholder needs to participate in recovery.
///
/// All records from one split operation carry byte-identical
/// `encrypted_blob`, `share_count` and `share_threshold`; only
/// `shamir_key` differs per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRecord {
    /// Raw Shamir share bytes (secret length + 1 trailing x-coordinate)
    pub shamir_key: Vec<u8>,
    /// The asymmetrically encrypted payload, shared across all records
    pub encrypted_blob: Vec<u8>,
    /// Total shares issued (N)
    pub share_count: usize,
    /// Shares required to recover (T)
    pub share_threshold: usize,
}

/// Wire metadata: `{"shareCount": N, "shareThreshold": T}`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meta {
    share_count: usize,
    share_threshold: usize,
}

/// Seal a [`ShareRecord`] into envelope bytes.
///
/// Archives the three named entries, generates a fresh single-use key,
/// AEAD-seals the archive and prepends the key. Pure function of the
/// record plus that one draw of randomness; two encodes of the same record
/// produce different bytes but decode identically.
pub fn encode(record: &ShareRecord) -> Result<Vec<u8>, EnvelopeError> {
    let meta = serde_json::to_vec(&Meta {
        share_count: record.share_count,
        share_threshold: record.share_threshold,
    })
    .map_err(|e| EnvelopeError::Encode(format!("metadata: {e}")))?;

    let entries = [
        FileEntry::new(MANIFEST_ENTRY, record.encrypted_blob.clone()),
        FileEntry::new(SHARE_ENTRY, record.shamir_key.clone()),
        FileEntry::new(META_ENTRY, meta),
    ];
    let archive =
        create_archive(&entries).map_err(|e| EnvelopeError::Encode(format!("archive: {e}")))?;

    let key = sealed::keygen();
    let ciphertext =
        sealed::seal(&key, &archive).map_err(|e| EnvelopeError::Encode(e.to_string()))?;

    let mut out = Vec::with_capacity(KEY_LEN + ciphertext.len());
    out.extend_from_slice(&key);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Open envelope bytes back into a [`ShareRecord`].
///
/// Exact left inverse of [`encode`]: the leading key is split off and used
/// to open the sealed archive, so `decode(encode(r)) == r` for every valid
/// record regardless of which key was drawn.
pub fn decode(bytes: &[u8]) -> Result<ShareRecord, EnvelopeError> {
    if bytes.len() <= KEY_LEN {
        return Err(EnvelopeError::Decode);
    }

    let (key_bytes, ciphertext) = bytes.split_at(KEY_LEN);
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(key_bytes);

    let archive = sealed::open(&key, ciphertext).map_err(|_| EnvelopeError::Decode)?;
    let files = read_archive(&archive).map_err(|_| EnvelopeError::Decode)?;

    let mut shamir_key = None;
    let mut encrypted_blob = None;
    let mut meta = None;

    for file in files {
        match file.name.as_str() {
            SHARE_ENTRY => shamir_key = Some(file.data),
            MANIFEST_ENTRY => encrypted_blob = Some(file.data),
            META_ENTRY => {
                meta = Some(
                    serde_json::from_slice::<Meta>(&file.data)
                        .map_err(|_| EnvelopeError::Decode)?,
                );
            }
            // Unknown entries are tolerated for forward compatibility
            _ => {}
        }
    }

    let (shamir_key, encrypted_blob, meta) = match (shamir_key, encrypted_blob, meta) {
        (Some(s), Some(b), Some(m)) => (s, b, m),
        _ => return Err(EnvelopeError::Decode),
    };

    Ok(ShareRecord {
        shamir_key,
        encrypted_blob,
        share_count: meta.share_count,
        share_threshold: meta.share_threshold,
    })
}

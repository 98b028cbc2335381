//! Cross-crate share properties: split/combine round trips over a
//! parameter grid, and envelope round trips for records built from real
//! splits.

use fragment_envelope::{decode, encode, ShareRecord};
use fragment_shamir::{combine, split, split_with_rng, ShamirError};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// All k-element index subsets of 0..n
fn subsets(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(k);
    fn rec(start: usize, n: usize, k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            rec(i + 1, n, k, current, out);
            current.pop();
        }
    }
    rec(0, n, k, &mut current, &mut out);
    out
}

#[test]
fn test_round_trip_grid() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for len in [1usize, 7, 32, 64] {
        let mut secret = vec![0u8; len];
        rng.fill_bytes(&mut secret);

        for threshold in 2..=6usize {
            let n = threshold + 2;
            let shares = split_with_rng(&secret, n, threshold, &mut rng).unwrap();

            // Every exact-threshold subset reconstructs
            for subset in subsets(n, threshold) {
                let picked: Vec<Vec<u8>> = subset.iter().map(|&i| shares[i].clone()).collect();
                assert_eq!(
                    combine(&picked).unwrap(),
                    secret,
                    "len={len} t={threshold} subset={subset:?}"
                );
            }

            // Every larger size up to n reconstructs too
            for size in threshold + 1..=n {
                assert_eq!(combine(&shares[0..size]).unwrap(), secret);
            }
        }
    }
}

#[test]
fn test_under_threshold_yields_wrong_secret() {
    let mut rng = StdRng::seed_from_u64(0xBAD5EED);

    for _ in 0..16 {
        let mut secret = [0u8; 24];
        rng.fill_bytes(&mut secret);
        let shares = split_with_rng(&secret, 6, 4, &mut rng).unwrap();

        // One below threshold: combine runs but the result is garbage
        let wrong = combine(&shares[0..3]).unwrap();
        assert_eq!(wrong.len(), secret.len());
        assert_ne!(wrong, secret);
    }
}

#[test]
fn test_duplicate_coordinates_are_rejected() {
    let shares = split(b"secret", 4, 2).unwrap();
    let dup = vec![shares[2].clone(), shares[0].clone(), shares[2].clone()];
    assert_eq!(combine(&dup), Err(ShamirError::DuplicateShare(3)));
}

#[test]
fn test_envelope_round_trip_with_real_shares() {
    let mut rng = StdRng::seed_from_u64(0xE2E);
    let mut blob = vec![0u8; 300];
    rng.fill_bytes(&mut blob);

    let shares = split(b"AGE-SECRET-KEY-1TESTTESTTEST", 5, 3).unwrap();
    for shamir_key in shares {
        let record = ShareRecord {
            shamir_key,
            encrypted_blob: blob.clone(),
            share_count: 5,
            share_threshold: 3,
        };
        assert_eq!(decode(&encode(&record).unwrap()).unwrap(), record);
    }
}

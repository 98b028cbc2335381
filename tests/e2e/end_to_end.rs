//! End-to-end scenarios: encrypt a payload into fragments, recover it from
//! subsets of them, and verify the failure modes a shareholder can hit.

use fragment_cli::{decrypt, encrypt, FragmentError};
use std::path::PathBuf;

fn encrypt_payload(payload: &[u8], shares: usize, threshold: usize) -> (tempfile::TempDir, Vec<PathBuf>) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.bin");
    std::fs::write(&input, payload).unwrap();
    let written = encrypt(&input, shares, threshold, dir.path()).unwrap();
    (dir, written)
}

#[test]
fn test_five_shares_threshold_three_recover_from_1_3_5() {
    let payload = b"ten bytes!";
    assert_eq!(payload.len(), 10);

    let (dir, written) = encrypt_payload(payload, 5, 3);
    assert_eq!(written.len(), 5);

    let out = dir.path().join("out.tar.gz");
    let subset = vec![written[0].clone(), written[2].clone(), written[4].clone()];
    decrypt(&subset, &out).unwrap();

    let entries = fragment_archive::read_archive(&std::fs::read(&out).unwrap()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "input.bin");
    assert_eq!(entries[0].data, payload);
}

#[test]
fn test_all_threshold_subsets_recover() {
    let payload = b"subset coverage";
    let (dir, written) = encrypt_payload(payload, 5, 3);
    let out = dir.path().join("out.tar.gz");

    for a in 0..5 {
        for b in (a + 1)..5 {
            for c in (b + 1)..5 {
                let subset = vec![written[a].clone(), written[b].clone(), written[c].clone()];
                decrypt(&subset, &out).unwrap();
                let entries =
                    fragment_archive::read_archive(&std::fs::read(&out).unwrap()).unwrap();
                assert_eq!(entries[0].data, payload, "subset ({a},{b},{c})");
            }
        }
    }

    // More than the threshold also works
    decrypt(&written, &out).unwrap();
    let entries = fragment_archive::read_archive(&std::fs::read(&out).unwrap()).unwrap();
    assert_eq!(entries[0].data, payload);
}

#[test]
fn test_below_threshold_fails_before_combine() {
    let (dir, written) = encrypt_payload(b"ten bytes!", 5, 3);
    let out = dir.path().join("out.tar.gz");

    let result = decrypt(&written[0..2], &out);
    assert!(matches!(
        result,
        Err(FragmentError::InsufficientShares { have: 2, need: 3 })
    ));
    assert!(!out.exists(), "no partial output on refused decrypt");
}

#[test]
fn test_mixed_fragments_from_two_runs_are_inconsistent() {
    let (dir_a, run_a) = encrypt_payload(b"first run", 3, 2);
    let (_dir_b, run_b) = encrypt_payload(b"second run", 3, 2);
    let out = dir_a.path().join("out.tar.gz");

    let mixed = vec![run_a[0].clone(), run_b[1].clone(), run_a[2].clone()];
    assert!(matches!(
        decrypt(&mixed, &out),
        Err(FragmentError::InconsistentShares)
    ));
}

#[test]
fn test_more_artifacts_than_issued_shares() {
    // Present the same split twice over: 4 decoded records against a
    // recorded share count of 3 must be refused before combine sees the
    // duplicated coordinates.
    let (dir, written) = encrypt_payload(b"payload", 3, 2);
    let out = dir.path().join("out.tar.gz");

    let mut too_many = written.clone();
    too_many.push(written[0].clone());
    assert!(matches!(
        decrypt(&too_many, &out),
        Err(FragmentError::TooManyShares { have: 4, max: 3 })
    ));
}

#[test]
fn test_directory_payload_preserves_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("tree");
    std::fs::create_dir_all(tree.join("a")).unwrap();
    std::fs::create_dir_all(tree.join("b")).unwrap();
    std::fs::write(tree.join("a/1.txt"), b"contents one").unwrap();
    std::fs::write(tree.join("b/2.txt"), b"contents two").unwrap();

    let written = encrypt(&tree, 3, 2, dir.path()).unwrap();

    let out = dir.path().join("out.tar.gz");
    decrypt(&written[1..3], &out).unwrap();

    let mut entries = fragment_archive::read_archive(&std::fs::read(&out).unwrap()).unwrap();
    entries.sort_by(|x, y| x.name.cmp(&y.name));
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "a/1.txt");
    assert_eq!(entries[0].data, b"contents one");
    assert_eq!(entries[1].name, "b/2.txt");
    assert_eq!(entries[1].data, b"contents two");
}

#[test]
fn test_tampered_fragment_aborts_loudly() {
    let (dir, written) = encrypt_payload(b"payload", 3, 2);
    let out = dir.path().join("out.tar.gz");

    let mut bytes = std::fs::read(&written[0]).unwrap();
    let idx = fragment_envelope::KEY_LEN + bytes.len() / 2;
    bytes[idx] ^= 0x01;
    std::fs::write(&written[0], &bytes).unwrap();

    assert!(matches!(
        decrypt(&written[0..2], &out),
        Err(FragmentError::Envelope(_))
    ));
    assert!(!out.exists());
}

//! Galois Field GF(256) arithmetic for Shamir's Secret Sharing
//!
//! Uses the irreducible polynomial x^8 + x^4 + x^3 + x + 1 (0x11B) with
//! generator 3 — the AES field construction. Shares are only interoperable
//! with previously issued ones if these semantics stay bit-exact, so the
//! polynomial and generator must never change.
//!
//! The exponent/log tables are built once on first use and are immutable
//! afterwards; they are plain read-only data and safe to share across
//! threads.

use once_cell::sync::Lazy;

/// Exp table over 510 entries so `log_a + log_b` and `log_a + 255 - log_b`
/// index without a modular reduction.
struct Tables {
    log: [u8; 256],
    exp: [u8; 510],
}

static TABLES: Lazy<Tables> = Lazy::new(|| {
    let mut log = [0u8; 256];
    let mut exp = [0u8; 510];

    // Walk the powers of the generator 3: x_{i+1} = x_i * 3 = x_i ^ (x_i * 2),
    // reducing by 0x11B on overflow.
    let mut x: u8 = 1;
    for i in 0..255 {
        exp[i] = x;
        exp[i + 255] = x;
        log[x as usize] = i as u8;
        let x2 = (x << 1) ^ if x & 0x80 != 0 { 0x1B } else { 0 };
        x = x2 ^ x;
    }

    Tables { log, exp }
});

/// Add two elements in GF(256) (XOR)
#[inline]
pub fn gf_add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Subtract two elements in GF(256) (same as add in characteristic 2)
#[inline]
pub fn gf_sub(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiply two elements in GF(256)
#[inline]
pub fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = &*TABLES;
    let log_a = t.log[a as usize] as usize;
    let log_b = t.log[b as usize] as usize;
    t.exp[log_a + log_b]
}

/// Divide two elements in GF(256)
#[inline]
pub fn gf_div(a: u8, b: u8) -> u8 {
    assert!(b != 0, "Division by zero in GF(256)");
    if a == 0 {
        return 0;
    }
    let t = &*TABLES;
    let log_a = t.log[a as usize] as usize;
    let log_b = t.log[b as usize] as usize;
    // Add 255 to keep the exponent difference non-negative
    t.exp[log_a + 255 - log_b]
}

/// Compute the inverse of an element in GF(256)
#[inline]
pub fn gf_inv(a: u8) -> u8 {
    assert!(a != 0, "Inverse of zero in GF(256)");
    let t = &*TABLES;
    t.exp[255 - t.log[a as usize] as usize]
}

/// Evaluate a polynomial at a given x value using Horner's method.
/// coefficients[0] is the constant term, coefficients[n-1] the highest degree.
pub fn poly_eval(coefficients: &[u8], x: u8) -> u8 {
    let mut result = 0u8;
    for &coef in coefficients.iter().rev() {
        result = gf_add(gf_mul(result, x), coef);
    }
    result
}

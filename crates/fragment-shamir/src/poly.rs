//! Polynomial engine: random polynomial construction and Lagrange
//! interpolation over GF(256).
//!
//! Polynomials exist only transiently during a split. Their random
//! coefficients are evaluated and then dropped; nothing above the constant
//! term is ever persisted.

use crate::gf256::{gf_add, gf_div, gf_mul, gf_sub};
use rand::{CryptoRng, RngCore};

/// Build a random polynomial of exactly `degree` with the given constant
/// term.
///
/// Returns `degree + 1` coefficients, lowest degree first. coefficient[0]
/// is `secret_byte`; the rest are drawn from `rng`. The leading coefficient
/// is rejection-sampled to be non-zero so the polynomial has true degree —
/// a zero there would silently lower the effective threshold by one.
///
/// The randomness source is injected so callers can substitute a seeded rng
/// in tests; production paths must pass a CSPRNG (the `CryptoRng` bound
/// keeps a plain PRNG from compiling).
pub fn make_polynomial<R: RngCore + CryptoRng>(
    secret_byte: u8,
    degree: usize,
    rng: &mut R,
) -> Vec<u8> {
    let mut coefficients = Vec::with_capacity(degree + 1);
    coefficients.push(secret_byte);

    for _ in 1..=degree {
        let mut byte = [0u8];
        rng.fill_bytes(&mut byte);
        coefficients.push(byte[0]);
    }

    if degree > 0 {
        while coefficients[degree] == 0 {
            let mut byte = [0u8];
            rng.fill_bytes(&mut byte);
            coefficients[degree] = byte[0];
        }
    }

    coefficients
}

/// Lagrange interpolation entirely in field arithmetic.
///
/// Given points with **distinct** x-coordinates, evaluates the unique
/// degree-(len-1) polynomial through them at `at`. Split recovery always
/// uses `at = 0`, where the constant term (the secret byte) lives.
///
/// Duplicate x-coordinates make the divisor zero; callers must reject them
/// first (see `combine`).
pub fn interpolate(points: &[(u8, u8)], at: u8) -> u8 {
    let mut result = 0u8;

    for (i, &(xi, yi)) in points.iter().enumerate() {
        let mut numerator = 1u8;
        let mut denominator = 1u8;

        for (j, &(xj, _)) in points.iter().enumerate() {
            if i != j {
                numerator = gf_mul(numerator, gf_sub(at, xj));
                denominator = gf_mul(denominator, gf_sub(xi, xj));
            }
        }

        let basis = gf_div(numerator, denominator);
        result = gf_add(result, gf_mul(yi, basis));
    }

    result
}

//! Integer helpers for jump-ahead
//!
//! Modular exponentiation with 128-bit intermediates, the geometric series
//! needed by the congruential generator, and reduction of signed jump
//! distances to a cycle length.

/// `base^exponent mod modulus`, for any modulus up to 2^64 - 1
///
/// # Panics
/// Panics if `modulus` is 0
///
/// # Example
/// ```
/// use simplerandom_core_rs::maths::pow_mod_u64;
///
/// assert_eq!(pow_mod_u64(3, 4, 1000), 81);
/// assert_eq!(pow_mod_u64(69069, 0, 1 << 32), 1);
/// ```
pub fn pow_mod_u64(base: u64, exponent: u64, modulus: u64) -> u64 {
    assert!(modulus != 0, "modulus must be non-zero");
    let m = u128::from(modulus);
    let mut result: u128 = 1 % m;
    let mut square = u128::from(base) % m;
    let mut n = exponent;
    while n != 0 {
        if n & 1 != 0 {
            result = result * square % m;
        }
        square = square * square % m;
        n >>= 1;
    }
    result as u64
}

/// `(a * b) mod modulus` without overflow
pub fn mul_mod_u64(a: u64, b: u64, modulus: u64) -> u64 {
    (u128::from(a) * u128::from(b) % u128::from(modulus)) as u64
}

/// Sum of the geometric series `1 + r + r^2 + ... + r^(n-1)`, modulo 2^32
///
/// Uses `(r^n - 1) / (r - 1)`. Since 2^32 shares the factor 2 with `r - 1`,
/// `r - 1` is split as `2^k * odd`: the numerator is computed modulo
/// `2^(32+k)` so the division by `2^k` is exact, and the odd part is divided
/// out with its inverse modulo 2^32.
///
/// # Example
/// ```
/// use simplerandom_core_rs::maths::geom_series_u32;
///
/// assert_eq!(geom_series_u32(3, 4), 1 + 3 + 9 + 27);
/// assert_eq!(geom_series_u32(69069, 0), 0);
/// assert_eq!(geom_series_u32(69069, 1), 1);
/// ```
pub fn geom_series_u32(r: u32, n: u64) -> u32 {
    if n == 0 {
        return 0;
    }
    if n == 1 || r == 0 {
        return 1;
    }
    if r == 1 {
        return n as u32;
    }

    let mut odd_factor = u64::from(r - 1);
    let mut common_shift = 0u32;
    while odd_factor % 2 == 0 {
        odd_factor /= 2;
        common_shift += 1;
    }

    let modulus_u32: u64 = 1 << 32;
    // common_shift < 32, so the extended modulus fits in a u64
    let extended_modulus: u64 = 1 << (32 + common_shift);
    let power = pow_mod_u64(u64::from(r), n, extended_modulus);
    let numerator = (power + extended_modulus - 1) % extended_modulus;
    let odd_inverse = pow_mod_u64(odd_factor, modulus_u32 - 1, modulus_u32);

    mul_mod_u64(numerator >> common_shift, odd_inverse, modulus_u32) as u32
}

/// Reduce a signed step count to `[0, cycle_len)`
///
/// Negative counts jump backwards, which is the same as jumping forwards by
/// `cycle_len - |n| mod cycle_len`.
pub fn reduce_steps(n: i128, cycle_len: u64) -> u64 {
    n.rem_euclid(i128::from(cycle_len)) as u64
}

//! Conversion of integers into ascii digits without allocation.

use heapless::Vec;

use crate::config::DigitCase;

pub const MIN_BASE: u8 = 2;
pub const MAX_BASE: u8 = 16;

/// Enough room for a u32 in base 2.
pub const MAX_DIGITS: usize = 32;

pub type Digits = Vec<u8, MAX_DIGITS>;

/// Maps a base into 2..=16. Anything else is a caller error, caught in debug builds.
pub fn checked_base(base: u8) -> u8 {
    debug_assert!(
        (MIN_BASE..=MAX_BASE).contains(&base),
        "numeric base {} outside 2..=16",
        base
    );
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        warn!("numeric base {} clamped into 2..=16", base);
    }
    base.clamp(MIN_BASE, MAX_BASE)
}

/// Digits of `value` in `base`, most significant first. Zero yields a single `0`.
pub fn to_digits(mut value: u32, base: u8, case: DigitCase) -> Digits {
    let base = checked_base(base) as u32;
    let table = case.digits();

    let mut digits = Digits::new();
    loop {
        // at most 32 iterations for base 2, so the push can not overflow
        let _ = digits.push(table[(value % base) as usize]);
        value /= base;
        if value == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

/// Number of fill characters needed to stretch `len` digits to `width`.
pub fn padding(len: usize, width: u8) -> usize {
    (width as usize).saturating_sub(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_a_single_digit() {
        assert_eq!(to_digits(0, 10, DigitCase::Upper).as_slice(), b"0");
        assert_eq!(to_digits(0, 2, DigitCase::Upper).as_slice(), b"0");
    }

    #[test]
    fn hex_follows_digit_case() {
        assert_eq!(to_digits(0xBEEF, 16, DigitCase::Upper).as_slice(), b"BEEF");
        assert_eq!(to_digits(0xBEEF, 16, DigitCase::Lower).as_slice(), b"beef");
    }

    #[test]
    fn u32_max_in_base_two_fills_the_buffer() {
        let digits = to_digits(u32::MAX, 2, DigitCase::Upper);
        assert_eq!(digits.len(), MAX_DIGITS);
        assert!(digits.iter().all(|&d| d == b'1'));
    }

    #[test]
    fn odd_bases() {
        assert_eq!(to_digits(8, 3, DigitCase::Upper).as_slice(), b"22");
        assert_eq!(to_digits(35, 7, DigitCase::Upper).as_slice(), b"50");
    }

    #[test]
    fn padding_never_goes_negative() {
        assert_eq!(padding(1, 4), 3);
        assert_eq!(padding(4, 4), 0);
        assert_eq!(padding(6, 2), 0);
    }
}

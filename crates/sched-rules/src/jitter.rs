//! Deterministic jitter (§4.4).
//!
//! Smears effective-date emails around their ideal send date without any
//! shared mutable RNG state: the offset is a pure function of
//! `(contact_id, event_name, year)`, so it reproduces identically across
//! runs and processes (Testable property 4).

/// FNV-1a, a small non-cryptographic hash with good avalanche behaviour for
/// short keys. Chosen over `std::collections::hash_map::DefaultHasher`
/// because its output is fixed by the algorithm rather than by the
/// standard library's (unspecified, version-dependent) SipHash keying.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Compute a deterministic offset in `[-window_days/2, window_days/2)` for
/// `(contact_id, event_name, year)`.
///
/// # Panics
/// Panics if `window_days` is zero — callers are expected to only jitter
/// within a non-degenerate window.
pub fn jitter(contact_id: i64, event_name: &str, year: u16, window_days: i32) -> i32 {
    assert!(window_days > 0, "jitter window must be positive");
    let key = format!("{contact_id}\u{0}{event_name}\u{0}{year}");
    let h = fnv1a(key.as_bytes());
    (h % window_days as u64) as i32 - window_days / 2
}

/// A deterministic value in `[0, modulus)` derived from `key`, for spreading
/// work (campaign send dates, overflow redistribution) without a shared RNG.
///
/// # Panics
/// Panics if `modulus` is zero.
pub fn hash_mod(key: &str, modulus: u64) -> u64 {
    assert!(modulus > 0, "hash_mod modulus must be positive");
    fnv1a(key.as_bytes()) % modulus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_function_of_inputs() {
        let a = jitter(42, "effective_date", 2024, 14);
        let b = jitter(42, "effective_date", 2024, 14);
        assert_eq!(a, b);
    }

    #[test]
    fn bounded_in_window() {
        for contact_id in 0..500i64 {
            let j = jitter(contact_id, "effective_date", 2024, 10);
            assert!(j >= -5 && j < 5, "jitter {j} out of bounds for contact {contact_id}");
        }
    }

    #[test]
    fn different_events_or_years_can_differ() {
        let a = jitter(1, "effective_date", 2024, 30);
        let b = jitter(1, "birthday", 2024, 30);
        let c = jitter(1, "effective_date", 2025, 30);
        assert!(a != b || a != c);
    }

    #[test]
    #[should_panic]
    fn zero_window_panics() {
        jitter(1, "effective_date", 2024, 0);
    }

    #[test]
    fn hash_mod_is_bounded_and_deterministic() {
        for i in 0..200u64 {
            let v = hash_mod(&format!("contact-{i}"), 37);
            assert!(v < 37);
        }
        assert_eq!(hash_mod("contact-1\u{0}5", 10), hash_mod("contact-1\u{0}5", 10));
    }
}

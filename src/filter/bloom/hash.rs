//! The two base string hashes behind the double hashing probe scheme.
//! They accumulate differently (shift-add vs. polynomial). Their low bits
//! are still tied together (djb2 and sdbm always differ in parity), so both
//! go through a finalizer before being reduced to a bit position.

/// djb2: `h = h * 33 + byte`, seeded with 5381.
#[inline]
pub fn djb2(key: &str) -> u64 {
    key.bytes().fold(5381u64, |hash, byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(byte as u64)
    })
}

/// sdbm: `h = byte + (h << 6) + (h << 16) - h`, seeded with 0.
#[inline]
pub fn sdbm(key: &str) -> u64 {
    key.bytes().fold(0u64, |hash, byte| {
        (byte as u64)
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash)
    })
}

/// Finalization mix of murmur3: every input bit affects every output bit.
#[inline]
pub fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^ (k >> 33)
}

/// `(h1, h2)` for double hashing, before reduction mod `m`.
#[inline]
pub fn base_hashes(key: &str) -> (u64, u64) {
    (fmix64(djb2(key)), fmix64(sdbm(key)))
}

#[cfg(test)]
mod tests {
    use super::{base_hashes, djb2, fmix64, sdbm};

    #[test]
    fn empty_key_yields_seed() {
        assert_eq!(djb2(""), 5381);
        assert_eq!(sdbm(""), 0);
    }

    #[test]
    fn known_values() {
        // 5381 * 33 + 'a'
        assert_eq!(djb2("a"), 177_670);
        // ((5381 * 33 + 'a') * 33) + 'b'
        assert_eq!(djb2("ab"), 5_863_208);
        assert_eq!(sdbm("a"), 97);
        // 'b' + 97 * 65599
        assert_eq!(sdbm("ab"), 6_363_201);
    }

    #[test]
    fn long_keys_wrap_instead_of_overflowing() {
        let key = "x".repeat(10_000);
        // would panic in debug builds without wrapping arithmetic
        assert_ne!(djb2(&key), sdbm(&key));
    }

    #[test]
    fn hashes_disagree() {
        for key in ["abc", "def", "xyz", "Abc"] {
            assert_ne!(djb2(key), sdbm(key), "{}", key);
        }
        assert_ne!(djb2("abc"), djb2("Abc"));
    }

    #[test]
    fn mixing_decouples_parity() {
        const KEYS: usize = 10_000;
        let keys: Vec<String> = (0..KEYS).map(|i| format!("key-{}", i)).collect();
        // raw hashes never share their lowest bit, which halves the usable
        // bit array for an even m
        assert!(keys
            .iter()
            .all(|key| djb2(key) & 1 != sdbm(key) & 1));
        let same_parity = keys
            .iter()
            .map(|key| base_hashes(key))
            .filter(|(h1, h2)| h1 & 1 == h2 & 1)
            .count();
        eprintln!("tp;keys with same parity after mixing: {}", same_parity);
        assert!(
            same_parity > KEYS * 2 / 5 && same_parity < KEYS * 3 / 5,
            "{} of {} keys share parity",
            same_parity,
            KEYS
        );
    }

    #[test]
    fn finalizer_keeps_zero() {
        assert_eq!(fmix64(0), 0);
        assert_ne!(fmix64(1), 1);
        assert_eq!(base_hashes("").1, 0);
    }
}

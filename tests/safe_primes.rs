//! Opt-in primality checks of the predefined groups: every modulus must be
//! a safe prime, i.e. `N` and `(N - 1) / 2` both prime.
//!
//! Miller-Rabin over the first thirteen primes as witnesses. Slow for the
//! larger groups, run with `cargo test -- --ignored`.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use srp6a::GroupId;

const WITNESSES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

fn is_probable_prime(n: &BigUint) -> bool {
    let one = BigUint::one();
    let two = &one + &one;

    if n < &two {
        return false;
    }
    if (n % &two).is_zero() {
        return n == &two;
    }

    // n - 1 = d * 2^r with d odd
    let n_minus_1 = n - &one;
    let mut d = n_minus_1.clone();
    let mut r = 0u32;
    while (&d % &two).is_zero() {
        d >>= 1;
        r += 1;
    }

    'witness: for w in WITNESSES {
        let w = BigUint::from(w);
        if &w >= n {
            continue;
        }
        let mut x = w.modpow(&d, n);
        if x == one || x == n_minus_1 {
            continue;
        }
        for _ in 1..r {
            x = x.modpow(&two, n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[test]
#[ignore = "slow: Miller-Rabin over moduli up to 8192 bits"]
fn predefined_moduli_are_safe_primes() {
    for id in [
        GroupId::N512,
        GroupId::N1024,
        GroupId::N1536,
        GroupId::N2048,
        GroupId::N3072,
        GroupId::N4096,
        GroupId::N6144,
        GroupId::N8192,
    ] {
        let n = &id.params().n;
        assert!(is_probable_prime(n), "{id:?}: N is not prime");
        let q = (n - BigUint::one()) >> 1;
        assert!(is_probable_prime(&q), "{id:?}: (N - 1) / 2 is not prime");
    }
}

#[test]
fn miller_rabin_agrees_with_small_primes() {
    let primes = [2u32, 3, 5, 7, 11, 13, 8191, 65537];
    let composites = [1u32, 4, 9, 15, 8192, 65535];
    for p in primes {
        assert!(is_probable_prime(&BigUint::from(p)), "{p} reported composite");
    }
    for c in composites {
        assert!(!is_probable_prime(&BigUint::from(c)), "{c} reported prime");
    }
}

//! The byte-level hash computations shared by both sides of the exchange.
//!
//! These are exposed to help other implementations with verification and
//! interoperability testing; regular users should go through the
//! [`client`](crate::client) and [`server`](crate::server) modules instead.
//!
//! Per RFC 5054, every value that is an element of the group (`N`, `g`,
//! `A`, `B`, `S`) is left-zero-padded to the byte length of `N` before it
//! enters a hash input. Salts, usernames and proof values are never padded.

use digest::{Digest, Output};
use num_bigint::BigUint;

use crate::groups::SrpGroup;

/// Left-zero-pad `bytes` to `size` bytes.
///
/// Inputs already at least `size` bytes long pass through unchanged, which
/// makes the operation idempotent.
#[must_use]
pub fn pad(bytes: &[u8], size: usize) -> Vec<u8> {
    if bytes.len() >= size {
        return bytes.to_vec();
    }
    let mut padded = vec![0u8; size - bytes.len()];
    padded.extend_from_slice(bytes);
    padded
}

/// u = H(PAD(A) | PAD(B))
///
/// `a_pub` and `b_pub` must already be padded to the group's size. The
/// caller is responsible for rejecting a zero result.
#[must_use]
pub fn compute_u<D: Digest>(a_pub: &[u8], b_pub: &[u8]) -> BigUint {
    let mut u = D::new();
    u.update(a_pub);
    u.update(b_pub);
    BigUint::from_bytes_be(&u.finalize())
}

/// k = H(PAD(N) | PAD(g))
#[must_use]
pub fn compute_k<D: Digest>(group: &SrpGroup) -> BigUint {
    let size = group.pad_size();
    let mut d = D::new();
    d.update(pad(&group.n.to_bytes_be(), size));
    d.update(pad(&group.g.to_bytes_be(), size));
    BigUint::from_bytes_be(&d.finalize())
}

/// x = H(salt | H(username | ":" | password))
#[must_use]
pub fn compute_x<D: Digest>(username: &[u8], password: &[u8], salt: &[u8]) -> BigUint {
    let identity = D::new()
        .chain_update(username)
        .chain_update(b":")
        .chain_update(password)
        .finalize();
    let x = D::new().chain_update(salt).chain_update(identity).finalize();
    BigUint::from_bytes_be(&x)
}

/// x = H(salt | H(":" | password))
///
/// Variant of [`compute_x`] for raw byte-string credentials with no
/// username mixed into the inner hash.
#[must_use]
pub fn compute_x_raw<D: Digest>(password: &[u8], salt: &[u8]) -> BigUint {
    let inner = D::new().chain_update(b":").chain_update(password).finalize();
    let x = D::new().chain_update(salt).chain_update(inner).finalize();
    BigUint::from_bytes_be(&x)
}

/// H(PAD(N)) XOR H(PAD(g))
///
/// The first operand of the client proof. Both digests have the same
/// length by construction.
#[must_use]
pub fn hash_n_xor_hash_g<D: Digest>(group: &SrpGroup) -> Vec<u8> {
    let size = group.pad_size();
    let h_n = D::digest(pad(&group.n.to_bytes_be(), size));
    let h_g = D::digest(pad(&group.g.to_bytes_be(), size));

    h_n.iter().zip(h_g.iter()).map(|(x1, x2)| x1 ^ x2).collect()
}

/// M1 = H( (H(PAD(N)) XOR H(PAD(g))) | H(username) | salt | PAD(A) | PAD(B) | K )
///
/// Hashing the username into the proof keeps a malicious server from
/// learning whether two users share a password (SRP-6a).
#[must_use]
pub fn compute_m1<D: Digest>(
    group: &SrpGroup,
    username: &[u8],
    salt: &[u8],
    a_pub: &[u8],
    b_pub: &[u8],
    key: &[u8],
) -> Output<D> {
    let mut d = D::new();
    d.update(hash_n_xor_hash_g::<D>(group));
    d.update(D::digest(username));
    d.update(salt);
    d.update(a_pub);
    d.update(b_pub);
    d.update(key);
    d.finalize()
}

/// M2 = H(PAD(A) | M1 | K)
#[must_use]
pub fn compute_m2<D: Digest>(a_pub: &[u8], m1: &[u8], key: &[u8]) -> Output<D> {
    let mut d = D::new();
    d.update(a_pub);
    d.update(m1);
    d.update(key);
    d.finalize()
}

/// K = H(PAD(S))
#[must_use]
pub fn session_key<D: Digest>(secret: &[u8]) -> Output<D> {
    D::digest(secret)
}

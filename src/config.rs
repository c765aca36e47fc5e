//! Protocol configuration shared by both sides of an exchange.

use core::marker::PhantomData;

use digest::{Digest, Output};
use num_bigint::BigUint;

use crate::errors::Result;
use crate::groups::{GroupId, SrpGroup};
use crate::key::SrpKey;
use crate::utils::{compute_k, pad};

/// The parameters both sides of an exchange must agree on: the group
/// `(N, g)`, the digest `D`, the derived multiplier `k = H(PAD(N) | PAD(g))`
/// and the padding width applied to every group element entering a hash.
///
/// A configuration is immutable once constructed and can be shared freely
/// between concurrent sessions. Client and server must hold equal
/// configurations or the exchange will fail at the proof step.
pub struct SrpConfig<D: Digest> {
    group: SrpGroup,
    k: BigUint,
    pad_size: usize,
    d: PhantomData<D>,
}

impl<D: Digest> Clone for SrpConfig<D> {
    fn clone(&self) -> Self {
        Self {
            group: self.group.clone(),
            k: self.k.clone(),
            pad_size: self.pad_size,
            d: PhantomData,
        }
    }
}

impl<D: Digest> SrpConfig<D> {
    /// Create a configuration over one of the predefined RFC 5054 groups.
    pub fn predefined(id: GroupId) -> Self {
        Self::from_group(id.params().clone())
    }

    /// Create a configuration over custom group parameters.
    ///
    /// No primality check is performed; the caller is responsible for the
    /// quality of `(n, g)`.
    pub fn custom(n: BigUint, g: BigUint) -> Self {
        Self::from_group(SrpGroup { n, g })
    }

    fn from_group(group: SrpGroup) -> Self {
        let pad_size = group.pad_size();
        let k = compute_k::<D>(&group);
        Self {
            group,
            k,
            pad_size,
            d: PhantomData,
        }
    }

    /// The group parameters.
    pub fn group(&self) -> &SrpGroup {
        &self.group
    }

    /// The prime modulus `N`.
    pub fn n(&self) -> &BigUint {
        &self.group.n
    }

    /// The generator `g`.
    pub fn g(&self) -> &BigUint {
        &self.group.g
    }

    /// The multiplier parameter `k = H(PAD(N) | PAD(g))`.
    pub fn k(&self) -> &BigUint {
        &self.k
    }

    /// Byte length of `N`; every group element is padded to this width
    /// before hashing.
    pub fn pad_size(&self) -> usize {
        self.pad_size
    }

    /// Apply the configured digest to arbitrary input.
    pub fn hash(&self, input: &[u8]) -> Output<D> {
        D::digest(input)
    }

    /// Left-zero-pad `bytes` to this configuration's padding width.
    pub fn pad(&self, bytes: &[u8]) -> Vec<u8> {
        pad(bytes, self.pad_size)
    }

    /// Build a key from big-endian bytes, adopting this configuration's
    /// padding width.
    pub fn key_from_bytes(&self, bytes: &[u8]) -> SrpKey {
        SrpKey::from_bytes(bytes, self.pad_size)
    }

    /// Parse a key from a hex string, adopting this configuration's padding
    /// width.
    pub fn key_from_hex(&self, hex: &str) -> Result<SrpKey> {
        SrpKey::from_hex(hex, self.pad_size)
    }
}

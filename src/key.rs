//! The key type used for every value exchanged during the protocol.

use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};
use crate::utils::pad;

/// A value in the exchange: a non-negative integer together with the
/// padding width of the group it belongs to.
///
/// Three views exist: the big-integer view ([`num`](Self::num)), the
/// minimal big-endian byte view ([`to_bytes`](Self::to_bytes)) and the
/// padded byte view ([`to_padded_bytes`](Self::to_padded_bytes)) that is
/// used whenever the value enters a hash input.
///
/// The integer is the single source of truth; both byte views are derived
/// from it on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrpKey {
    num: BigUint,
    pad: usize,
}

impl SrpKey {
    /// Build a key from big-endian bytes. Digest output is accepted
    /// directly as it is already a big-endian integer encoding.
    pub fn from_bytes(bytes: &[u8], pad: usize) -> Self {
        Self {
            num: BigUint::from_bytes_be(bytes),
            pad,
        }
    }

    /// Parse a key from a hex string.
    pub fn from_hex(hex: &str, pad: usize) -> Result<Self> {
        if hex.is_empty() {
            return Err(Error::InvalidKey);
        }
        let num = BigUint::parse_bytes(hex.as_bytes(), 16).ok_or(Error::InvalidKey)?;
        Ok(Self { num, pad })
    }

    /// Build a key from an integer.
    pub fn from_biguint(num: BigUint, pad: usize) -> Self {
        Self { num, pad }
    }

    /// The big-integer view.
    pub fn num(&self) -> &BigUint {
        &self.num
    }

    /// The minimal big-endian encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.num.to_bytes_be()
    }

    /// The big-endian encoding left-zero-padded to the group's width.
    pub fn to_padded_bytes(&self) -> Vec<u8> {
        pad(&self.num.to_bytes_be(), self.pad)
    }

    /// Uppercase hex encoding of the integer view.
    pub fn to_hex(&self) -> String {
        format!("{:X}", self.num)
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

/// An ephemeral keypair: the public group element and the raw private
/// exponent bytes it was derived from.
///
/// The private bytes are zeroized when the pair is dropped and never leave
/// it except into the shared-secret computations. Pairs are meant to live
/// for a single session and must never be persisted.
pub struct SrpKeyPair {
    public: SrpKey,
    private: Zeroizing<Vec<u8>>,
}

impl SrpKeyPair {
    pub(crate) fn new(public: SrpKey, private: Zeroizing<Vec<u8>>) -> Self {
        Self { public, private }
    }

    /// The public ephemeral (`A` on the client, `B` on the server).
    pub fn public(&self) -> &SrpKey {
        &self.public
    }

    /// The private exponent as an integer.
    ///
    /// Note the returned value is a heap allocation outside the zeroized
    /// buffer; it is kept crate-internal and short-lived for that reason.
    pub(crate) fn private_num(&self) -> BigUint {
        BigUint::from_bytes_be(&self.private)
    }
}

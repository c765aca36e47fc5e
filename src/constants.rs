//! Constants used throughout the protocol.

/// Byte length of newly generated salts.
pub const SALT_LENGTH: usize = 16;

/// Byte length of the random ephemeral private exponents `a` and `b`.
pub const EPHEMERAL_KEY_LENGTH: usize = 32;

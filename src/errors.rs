use core::fmt;

/// Errors that can occur during the protocol
///
/// Every error is fatal for the session it occurred in: the associated
/// state must be discarded and the exchange restarted from scratch.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The client's public ephemeral `A` reduced to zero modulo `N`.
    NullClientKey,
    /// The server's public ephemeral `B` reduced to zero modulo `N`, or the
    /// scrambling parameter `u` derived from it was zero.
    NullServerKey,
    /// The client proof `M1` did not match the server's recomputation;
    /// authentication failed.
    InvalidClientProof,
    /// The server proof `M2` did not match the client's recomputation; the
    /// server could not be authenticated.
    InvalidServerProof,
    /// A supplied byte or hex string could not be parsed as a key.
    InvalidKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NullClientKey => write!(f, "client public key is zero modulo N"),
            Error::NullServerKey => {
                write!(f, "server public key or scrambling parameter is zero modulo N")
            }
            Error::InvalidClientProof => {
                write!(f, "client proof didn't match, authentication failed")
            }
            Error::InvalidServerProof => {
                write!(f, "server proof didn't match, server not authenticated")
            }
            Error::InvalidKey => write!(f, "value could not be parsed as a key"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type
pub type Result<T> = core::result::Result<T, Error>;

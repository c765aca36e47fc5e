use crate::key::SrpKey;

/// Trait abstracting over the storage and retrieval of verifiers
///
/// Persistence itself is outside the protocol core; the server-side flow
/// only ever reads a user's `(salt, verifier)` record through this seam.
pub trait VerifierStore {
    /// Look up the salt and verifier registered for `username`.
    ///
    /// Returning `None` must be handled by the caller without revealing to
    /// the client whether the account exists.
    fn lookup(&self, username: &[u8]) -> Option<(Vec<u8>, SrpKey)>;

    /// Store a user's record, overwriting any previous one. Overwriting is
    /// required for password changes.
    fn store(&mut self, username: &[u8], salt: Vec<u8>, verifier: SrpKey);
}

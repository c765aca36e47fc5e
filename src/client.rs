//! Implementation of the client side of the SRP-6a protocol.

use digest::{Digest, Output};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::config::SrpConfig;
use crate::constants::{EPHEMERAL_KEY_LENGTH, SALT_LENGTH};
use crate::errors::{Error, Result};
use crate::key::{SrpKey, SrpKeyPair};
use crate::utils::{compute_m1, compute_m2, compute_u, compute_x, compute_x_raw, session_key};

/// Implementation of the client side of the SRP-6a protocol
///
/// Every protocol computation is available as a standalone operation for
/// callers that manage session state themselves; [`begin_login`](Self::begin_login)
/// starts a guided session whose states are consumed on every transition,
/// making reuse of stale session data unrepresentable.
pub struct SrpClient<'a, D: Digest> {
    config: &'a SrpConfig<D>,
}

impl<'a, D: Digest> SrpClient<'a, D> {
    /// Create a new client over a configuration.
    pub fn new(config: &'a SrpConfig<D>) -> Self {
        Self { config }
    }

    /// Registration: draw a fresh 16-byte salt and derive the password
    /// verifier `v = g^x mod N` where `x = H(salt | H(username | ":" | password))`.
    ///
    /// # Arguments:
    /// - `rng` - the CSPRNG the salt is drawn from
    /// - `username` - the UTF-8 username to register
    /// - `password` - the password for the user
    ///
    /// # Return:
    /// (`salt`, `verifier`) - for the server to persist against the
    /// username. The password itself must never be stored.
    ///
    pub fn generate_salt_and_verifier<CSPRNG>(
        &self,
        rng: &mut CSPRNG,
        username: &[u8],
        password: &[u8],
    ) -> (Vec<u8>, SrpKey)
    where
        CSPRNG: CryptoRngCore,
    {
        let mut salt = vec![0u8; SALT_LENGTH];
        rng.fill_bytes(&mut salt);
        let verifier = self.compute_verifier(username, password, &salt);
        (salt, verifier)
    }

    /// Derive the password verifier for a caller-provided salt.
    pub fn compute_verifier(&self, username: &[u8], password: &[u8], salt: &[u8]) -> SrpKey {
        let x = compute_x::<D>(username, password, salt);
        let v = self.config.g().modpow(&x, self.config.n());
        SrpKey::from_biguint(v, self.config.pad_size())
    }

    /// Generate an ephemeral keypair: 32 random bytes for `a`,
    /// `A = g^a mod N`.
    ///
    /// `A` is resampled in the astronomically unlikely case that it reduces
    /// to zero, since a zero public key would break the exchange.
    pub fn generate_keys<CSPRNG>(&self, rng: &mut CSPRNG) -> SrpKeyPair
    where
        CSPRNG: CryptoRngCore,
    {
        loop {
            let mut private = Zeroizing::new(vec![0u8; EPHEMERAL_KEY_LENGTH]);
            rng.fill_bytes(&mut private);
            let pair = self.keys_from_private(&private);
            if !pair.public().is_zero() {
                return pair;
            }
        }
    }

    /// Deterministic variant of [`generate_keys`](Self::generate_keys) for a
    /// caller-provided private exponent.
    pub fn keys_from_private(&self, private: &[u8]) -> SrpKeyPair {
        let a = BigUint::from_bytes_be(private);
        let a_pub = self.config.g().modpow(&a, self.config.n());
        SrpKeyPair::new(
            SrpKey::from_biguint(a_pub, self.config.pad_size()),
            Zeroizing::new(private.to_vec()),
        )
    }

    /// Compute the shared secret `S = (B - k * g^x) ^ (a + u * x) mod N`.
    ///
    /// # Arguments:
    /// - `username`, `password`, `salt` - the credentials, as at registration
    /// - `keys` - the client's ephemeral keypair
    /// - `server_public` - `B`, as received from the server
    ///
    /// # Return:
    /// - Ok(`secret`): the raw shared secret `S`, padded to the group size
    /// - Err([`Error::NullServerKey`]): `B` or the scrambling parameter `u`
    ///   reduced to zero, the exchange must be aborted
    ///
    pub fn calculate_shared_secret(
        &self,
        username: &[u8],
        password: &[u8],
        salt: &[u8],
        keys: &SrpKeyPair,
        server_public: &SrpKey,
    ) -> Result<SrpKey> {
        let x = compute_x::<D>(username, password, salt);
        self.shared_secret_with_x(keys, server_public, &x)
    }

    /// Variant of [`calculate_shared_secret`](Self::calculate_shared_secret)
    /// for raw byte-string credentials: the inner hash covers `":" | password`
    /// with no username.
    pub fn calculate_shared_secret_raw(
        &self,
        password: &[u8],
        salt: &[u8],
        keys: &SrpKeyPair,
        server_public: &SrpKey,
    ) -> Result<SrpKey> {
        let x = compute_x_raw::<D>(password, salt);
        self.shared_secret_with_x(keys, server_public, &x)
    }

    fn shared_secret_with_x(
        &self,
        keys: &SrpKeyPair,
        server_public: &SrpKey,
        x: &BigUint,
    ) -> Result<SrpKey> {
        let n = self.config.n();

        let b_pub = server_public.num() % n;
        if b_pub.is_zero() {
            return Err(Error::NullServerKey);
        }

        let u = compute_u::<D>(
            &keys.public().to_padded_bytes(),
            &server_public.to_padded_bytes(),
        );
        if u.is_zero() {
            return Err(Error::NullServerKey);
        }

        // base = B - k * g^x, brought into Z_N before exponentiation
        let k_g_x = (self.config.k() * self.config.g().modpow(x, n)) % n;
        let base = ((n + &b_pub) - k_g_x) % n;
        let exponent = keys.private_num() + &u * x;
        let secret = base.modpow(&exponent, n);

        Ok(SrpKey::from_biguint(secret, self.config.pad_size()))
    }

    /// Compute the client proof
    /// `M1 = H( (H(PAD(N)) XOR H(PAD(g))) | H(username) | salt | PAD(A) | PAD(B) | K )`
    /// where `K = H(PAD(S))`.
    pub fn calculate_client_proof(
        &self,
        username: &[u8],
        salt: &[u8],
        a_pub: &SrpKey,
        b_pub: &SrpKey,
        secret: &SrpKey,
    ) -> Output<D> {
        let key = session_key::<D>(&secret.to_padded_bytes());
        compute_m1::<D>(
            self.config.group(),
            username,
            salt,
            &a_pub.to_padded_bytes(),
            &b_pub.to_padded_bytes(),
            &key,
        )
    }

    /// Compute the server proof `M2 = H(PAD(A) | M1 | K)` where
    /// `K = H(PAD(S))`.
    pub fn calculate_server_proof(&self, a_pub: &SrpKey, m1: &[u8], secret: &SrpKey) -> Output<D> {
        let key = session_key::<D>(&secret.to_padded_bytes());
        compute_m2::<D>(&a_pub.to_padded_bytes(), m1, &key)
    }

    /// Verify the proof received from the server against our own
    /// recomputation, in constant time.
    ///
    /// # Return:
    /// - Ok(()): the server knows the verifier and is authenticated
    /// - Err([`Error::InvalidServerProof`]): the proofs didn't match
    ///
    pub fn verify_server_proof(
        &self,
        server_proof: &[u8],
        m1: &[u8],
        a_pub: &SrpKey,
        secret: &SrpKey,
    ) -> Result<()> {
        let expected = self.calculate_server_proof(a_pub, m1, secret);
        if expected.ct_eq(server_proof).into() {
            Ok(())
        } else {
            Err(Error::InvalidServerProof)
        }
    }

    /// Begin a guided authentication session.
    ///
    /// # Return:
    /// [`next_step`](ClientLogin): the client waiting for the server's
    /// `(salt, B)` reply; its [`public_key`](ClientLogin::public_key) is the
    /// `A` to send to the server along with the username.
    ///
    pub fn begin_login<CSPRNG>(&self, rng: &mut CSPRNG) -> ClientLogin<'a, D>
    where
        CSPRNG: CryptoRngCore,
    {
        ClientLogin {
            config: self.config,
            keys: self.generate_keys(rng),
        }
    }
}

/// Client waiting for the server's `(salt, B)` reply
pub struct ClientLogin<'a, D: Digest> {
    config: &'a SrpConfig<D>,
    keys: SrpKeyPair,
}

impl<'a, D: Digest> ClientLogin<'a, D> {
    /// The public ephemeral `A` to send to the server.
    pub fn public_key(&self) -> &SrpKey {
        self.keys.public()
    }

    /// Consume the server's reply, derive the shared secret and the client
    /// proof.
    ///
    /// # Arguments:
    /// - `username`, `password` - the user's credentials
    /// - `salt` - the salt received from the server
    /// - `server_public` - `B`, as received from the server
    ///
    /// # Return:
    /// - Ok([`next_step`](ClientProofSent)): holds the proof `M1` to send
    /// - Err([`Error::NullServerKey`]): `B` was invalid, the session is dead
    ///
    pub fn receive_server_key(
        self,
        username: &[u8],
        password: &[u8],
        salt: &[u8],
        server_public: &SrpKey,
    ) -> Result<ClientProofSent<'a, D>> {
        let client = SrpClient {
            config: self.config,
        };
        let secret =
            client.calculate_shared_secret(username, password, salt, &self.keys, server_public)?;
        let m1 =
            client.calculate_client_proof(username, salt, self.keys.public(), server_public, &secret);

        Ok(ClientProofSent {
            config: self.config,
            a_pub: self.keys.public().clone(),
            m1,
            secret,
        })
    }
}

/// Client that has issued its proof and waits for the server's `M2`
pub struct ClientProofSent<'a, D: Digest> {
    config: &'a SrpConfig<D>,
    a_pub: SrpKey,
    m1: Output<D>,
    secret: SrpKey,
}

impl<'a, D: Digest> ClientProofSent<'a, D> {
    /// The client proof `M1` to send to the server.
    pub fn proof(&self) -> &Output<D> {
        &self.m1
    }

    /// Verify the server's proof, in constant time. This completes the
    /// protocol.
    ///
    /// # Return:
    /// - Ok(`key`): the session key `K = H(PAD(S))` shared with the server
    /// - Err([`Error::InvalidServerProof`]): the server could not prove
    ///   knowledge of the verifier; the session is dead
    ///
    pub fn verify_server_proof(self, server_proof: &[u8]) -> Result<Output<D>> {
        let client = SrpClient {
            config: self.config,
        };
        client.verify_server_proof(server_proof, &self.m1, &self.a_pub, &self.secret)?;
        Ok(session_key::<D>(&self.secret.to_padded_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::GroupId;
    use sha2::Sha256;

    #[test]
    fn verifier_is_deterministic_in_the_salt() {
        let config = SrpConfig::<Sha256>::predefined(GroupId::N1024);
        let client = SrpClient::new(&config);
        let a = client.compute_verifier(b"alice", b"password123", b"salt-one");
        let b = client.compute_verifier(b"alice", b"password123", b"salt-one");
        let c = client.compute_verifier(b"alice", b"password123", b"salt-two");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn verifier_is_padded_to_group_size() {
        let config = SrpConfig::<Sha256>::predefined(GroupId::N1024);
        let client = SrpClient::new(&config);
        let v = client.compute_verifier(b"alice", b"password123", b"salt");
        assert_eq!(v.to_padded_bytes().len(), config.pad_size());
    }

    #[test]
    fn public_key_derivation_is_deterministic() {
        let config = SrpConfig::<Sha256>::predefined(GroupId::N1024);
        let client = SrpClient::new(&config);
        let first = client.keys_from_private(&[7u8; 32]);
        let second = client.keys_from_private(&[7u8; 32]);
        assert_eq!(first.public(), second.public());
    }
}

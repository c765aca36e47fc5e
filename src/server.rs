//! Implementation of the server side of the SRP-6a protocol.

use digest::{Digest, Output};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::config::SrpConfig;
use crate::constants::EPHEMERAL_KEY_LENGTH;
use crate::errors::{Error, Result};
use crate::key::{SrpKey, SrpKeyPair};
use crate::utils::{compute_m1, compute_m2, compute_u, session_key};

/// Implementation of the server side of the SRP-6a protocol
///
/// The server never sees the password; it works from the `(salt, verifier)`
/// record produced at registration. As on the client side, every
/// computation is available standalone, and
/// [`begin_login`](Self::begin_login) starts a consume-on-transition
/// session.
pub struct SrpServer<'a, D: Digest> {
    config: &'a SrpConfig<D>,
}

impl<'a, D: Digest> SrpServer<'a, D> {
    /// Create a new server over a configuration.
    pub fn new(config: &'a SrpConfig<D>) -> Self {
        Self { config }
    }

    /// Generate an ephemeral keypair: 32 random bytes for `b`,
    /// `B = (k * v + g^b) mod N`.
    ///
    /// `B` is resampled in the astronomically unlikely case that it reduces
    /// to zero.
    pub fn generate_keys<CSPRNG>(&self, rng: &mut CSPRNG, verifier: &SrpKey) -> SrpKeyPair
    where
        CSPRNG: CryptoRngCore,
    {
        loop {
            let mut private = Zeroizing::new(vec![0u8; EPHEMERAL_KEY_LENGTH]);
            rng.fill_bytes(&mut private);
            let pair = self.keys_from_private(&private, verifier);
            if !pair.public().is_zero() {
                return pair;
            }
        }
    }

    /// Deterministic variant of [`generate_keys`](Self::generate_keys) for a
    /// caller-provided private exponent.
    pub fn keys_from_private(&self, private: &[u8], verifier: &SrpKey) -> SrpKeyPair {
        let n = self.config.n();
        let b = BigUint::from_bytes_be(private);
        let b_pub = (self.config.k() * verifier.num() + self.config.g().modpow(&b, n)) % n;
        SrpKeyPair::new(
            SrpKey::from_biguint(b_pub, self.config.pad_size()),
            Zeroizing::new(private.to_vec()),
        )
    }

    /// Compute the shared secret `S = (A * v^u) ^ b mod N`.
    ///
    /// # Arguments:
    /// - `client_public` - `A`, as received from the client
    /// - `keys` - the server's ephemeral keypair
    /// - `verifier` - the user's password verifier `v`
    ///
    /// # Return:
    /// - Ok(`secret`): the raw shared secret `S`, padded to the group size
    /// - Err([`Error::NullClientKey`]): `A` reduced to zero modulo `N`, the
    ///   exchange must be aborted
    ///
    pub fn calculate_shared_secret(
        &self,
        client_public: &SrpKey,
        keys: &SrpKeyPair,
        verifier: &SrpKey,
    ) -> Result<SrpKey> {
        let n = self.config.n();

        let a_pub = client_public.num() % n;
        if a_pub.is_zero() {
            return Err(Error::NullClientKey);
        }

        let u = compute_u::<D>(
            &client_public.to_padded_bytes(),
            &keys.public().to_padded_bytes(),
        );

        let base = (&a_pub * verifier.num().modpow(&u, n)) % n;
        let secret = base.modpow(&keys.private_num(), n);

        Ok(SrpKey::from_biguint(secret, self.config.pad_size()))
    }

    /// Verify the client's proof against our own recomputation, in constant
    /// time.
    ///
    /// # Arguments:
    /// - `client_proof` - `M1`, as received from the client
    /// - `username`, `salt` - the user's registration record
    /// - `client_public`, `server_public` - the session's `A` and `B`
    /// - `secret` - the shared secret derived on this side
    ///
    /// # Return:
    /// - Ok(`M2`): the user is authenticated; `M2` is the proof to send back
    /// - Err([`Error::InvalidClientProof`]): authentication failed, the
    ///   session is dead
    ///
    pub fn verify_client_proof(
        &self,
        client_proof: &[u8],
        username: &[u8],
        salt: &[u8],
        client_public: &SrpKey,
        server_public: &SrpKey,
        secret: &SrpKey,
    ) -> Result<Output<D>> {
        let key = session_key::<D>(&secret.to_padded_bytes());
        let expected = compute_m1::<D>(
            self.config.group(),
            username,
            salt,
            &client_public.to_padded_bytes(),
            &server_public.to_padded_bytes(),
            &key,
        );

        if expected.ct_eq(client_proof).into() {
            Ok(compute_m2::<D>(
                &client_public.to_padded_bytes(),
                &expected,
                &key,
            ))
        } else {
            Err(Error::InvalidClientProof)
        }
    }

    /// Begin a guided authentication session from the client's `A` and the
    /// user's registration record.
    ///
    /// # Arguments:
    /// - `rng` - the CSPRNG the ephemeral `b` is drawn from
    /// - `username`, `salt`, `verifier` - the registration record
    /// - `client_public` - `A`, as received from the client
    ///
    /// # Return:
    /// - Ok([`next_step`](ServerLogin)): holds `B`
    ///   ([`public_key`](ServerLogin::public_key)) to send back with the salt
    /// - Err([`Error::NullClientKey`]): `A` was invalid, nothing was leaked
    ///
    pub fn begin_login<CSPRNG>(
        &self,
        rng: &mut CSPRNG,
        username: &[u8],
        salt: &[u8],
        verifier: &SrpKey,
        client_public: &SrpKey,
    ) -> Result<ServerLogin<'a, D>>
    where
        CSPRNG: CryptoRngCore,
    {
        let keys = self.generate_keys(rng, verifier);
        let secret = self.calculate_shared_secret(client_public, &keys, verifier)?;

        Ok(ServerLogin {
            config: self.config,
            username: username.to_vec(),
            salt: salt.to_vec(),
            client_public: client_public.clone(),
            keys,
            secret,
        })
    }
}

/// Server waiting for the client's proof
pub struct ServerLogin<'a, D: Digest> {
    config: &'a SrpConfig<D>,
    username: Vec<u8>,
    salt: Vec<u8>,
    client_public: SrpKey,
    keys: SrpKeyPair,
    secret: SrpKey,
}

impl<'a, D: Digest> ServerLogin<'a, D> {
    /// The public ephemeral `B` to send to the client together with the
    /// user's salt.
    pub fn public_key(&self) -> &SrpKey {
        self.keys.public()
    }

    /// Verify the client's proof, in constant time. Consumes the session.
    ///
    /// # Return:
    /// - Ok((`M2`, `key`)): the user is authenticated; `M2` is the proof to
    ///   send back and `key` the shared session key `K = H(PAD(S))`
    /// - Err([`Error::InvalidClientProof`]): authentication failed, the
    ///   session is dead
    ///
    pub fn receive_client_proof(self, client_proof: &[u8]) -> Result<(Output<D>, Output<D>)> {
        let server = SrpServer {
            config: self.config,
        };
        let m2 = server.verify_client_proof(
            client_proof,
            &self.username,
            &self.salt,
            &self.client_public,
            self.keys.public(),
            &self.secret,
        )?;
        let key = session_key::<D>(&self.secret.to_padded_bytes());
        Ok((m2, key))
    }
}

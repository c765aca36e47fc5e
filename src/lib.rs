#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
//!
//! # Protocol description
//! Here we briefly describe the SRP-6a protocol. For additional information
//! refer to [RFC 2945] and [RFC 5054]. All arithmetic is done modulo the
//! safe prime `N`, with generator `g`. `PAD()` left-zero-pads a value to
//! the byte length of `N`.
//!
//! |       Server                        |   Data transfer   |      Client                               |
//! |-------------------------------------|-------------------|-------------------------------------------|
//! |                                     | Registration (once) |                                         |
//! | store `(s, v)` for `I`              | <- `I`, `s`, `v`  | `s = random`                              |
//! |                                     |                   | `x = H(s ‖ H(I ‖ ":" ‖ P))`, `v = g^x`    |
//! |                                     | Authentication    |                                           |
//! | lookup `(s, v)` for `I`             | <- `I`, `A`       | `a = random`, `A = g^a`                   |
//! | `b = random`, `B = k·v + g^b`       | `B`, `s` ->       |                                           |
//! | `u = H(PAD(A) ‖ PAD(B))`            |                   | `u = H(PAD(A) ‖ PAD(B))`                  |
//! | abort if `A mod N = 0`              |                   | abort if `B mod N = 0` or `u = 0`         |
//! | `S = (A·v^u)^b`                     |                   | `x = H(s ‖ H(I ‖ ":" ‖ P))`               |
//! |                                     |                   | `S = (B − k·g^x)^(a + u·x)`               |
//! | `K = H(PAD(S))`                     |                   | `K = H(PAD(S))`                           |
//! | verify `M1`                         | <- `M1`           | `M1 = H((H(N)⊕H(g)) ‖ H(I) ‖ s ‖ PAD(A) ‖ PAD(B) ‖ K)` |
//! | `M2 = H(PAD(A) ‖ M1 ‖ K)`           | `M2` ->           | verify `M2`                               |
//!
//! Variables and notations have the following meaning:
//!
//! - `N`, `g` — the group: a safe prime and a generator modulo `N`
//! - `k` — multiplier parameter, `H(PAD(N) ‖ PAD(g))`
//! - `I`, `P` — username and password, UTF-8 encoded
//! - `s` — the user's salt
//! - `x` — private key derived from the credentials and salt
//! - `v` — password verifier, `g^x mod N`; the only secret the server stores
//! - `a`, `A` / `b`, `B` — ephemeral private/public values of client / server
//! - `u` — scrambling parameter
//! - `S` — shared secret (raw group element)
//! - `K` — session key, `H(PAD(S))`
//! - `M1`, `M2` — client and server proofs of `K`
//! - `H` — the configured one-way hash function
//! - `‖` — concatenation
//!
//! # Security
//!
//! Proof comparisons run in constant time via [`subtle`]. Modular
//! exponentiation is performed by `num-bigint`, which makes no
//! constant-time guarantees. Ephemeral private exponents are zeroized on
//! drop; big-integer temporaries derived from them cannot be scrubbed.
//!
//! A failed session leaves no observable state beyond the returned error
//! and must be discarded; the consume-on-transition session types enforce
//! this at compile time.
//!
//! [RFC 2945]: https://datatracker.ietf.org/doc/html/rfc2945
//! [RFC 5054]: https://datatracker.ietf.org/doc/html/rfc5054

mod database;
mod errors;

/// Module containing the implementation of the client for the SRP-6a protocol
pub mod client;

/// Module containing the implementation of the server for the SRP-6a protocol
pub mod server;

/// Module containing the shared protocol configuration
pub mod config;

/// Module containing constants used in the code
pub mod constants;

/// Module containing the predefined RFC 5054 groups
pub mod groups;

/// Module containing the key types exchanged during the protocol
pub mod key;

/// Module containing the byte-level hash computations, exposed for
/// verification against other implementations
pub mod utils;

pub use self::{
    client::{ClientLogin, ClientProofSent, SrpClient},
    config::SrpConfig,
    database::VerifierStore,
    errors::{Error, Result},
    groups::{GroupId, SrpGroup},
    key::{SrpKey, SrpKeyPair},
    server::{ServerLogin, SrpServer},
};

/// Default configuration instantiation with SHA-256
#[cfg(feature = "sha2")]
pub type Config = config::SrpConfig<sha2::Sha256>;

/// Default client instantiation with SHA-256
#[cfg(feature = "sha2")]
pub type Client<'a> = client::SrpClient<'a, sha2::Sha256>;

/// Default server instantiation with SHA-256
#[cfg(feature = "sha2")]
pub type Server<'a> = server::SrpServer<'a, sha2::Sha256>;

//! Full SRP-6a exchange between a client and a server, with the server
//! reading credentials through a [`VerifierStore`].
//!
//! Run with `cargo run --example key_agreement`.

use rand_core::OsRng;
use srp6a::{Client, Config, GroupId, Result, Server, SrpKey, VerifierStore};

/// Storage for a single user's registration record
#[derive(Default)]
struct SingleUserStore {
    record: Option<(Vec<u8>, Vec<u8>, SrpKey)>,
}

impl VerifierStore for SingleUserStore {
    fn lookup(&self, username: &[u8]) -> Option<(Vec<u8>, SrpKey)> {
        match &self.record {
            Some((user, salt, verifier)) if user == username => {
                Some((salt.clone(), verifier.clone()))
            }
            _ => None,
        }
    }

    fn store(&mut self, username: &[u8], salt: Vec<u8>, verifier: SrpKey) {
        self.record = Some((username.to_vec(), salt, verifier));
    }
}

fn main() -> Result<()> {
    // example username and password, never use these...
    const USERNAME: &[u8] = b"jlpicard_1701";
    const PASSWORD: &[u8] = b"g04tEd_c4pT41N";

    let config = Config::predefined(GroupId::N2048);
    let client = Client::new(&config);
    let server = Server::new(&config);

    // ===== Registration =====
    let mut store = SingleUserStore::default();
    let (salt, verifier) = client.generate_salt_and_verifier(&mut OsRng, USERNAME, PASSWORD);
    store.store(USERNAME, salt, verifier);
    println!("[client] registered user");

    // ===== Authentication =====
    // client -> server: username, A
    let login = client.begin_login(&mut OsRng);
    println!("[client] sending public ephemeral A");

    // server -> client: salt, B
    let (salt, verifier) = store.lookup(USERNAME).expect("user is registered");
    let session = server.begin_login(&mut OsRng, USERNAME, &salt, &verifier, login.public_key())?;
    println!("[server] sending salt and public ephemeral B");

    // client -> server: M1
    let proof_sent = login.receive_server_key(USERNAME, PASSWORD, &salt, session.public_key())?;
    let m1 = proof_sent.proof().clone();
    println!("[client] sending client proof M1");

    // server -> client: M2
    let (m2, server_key) = session.receive_client_proof(m1.as_slice())?;
    println!("[server] client authenticated, sending server proof M2");

    let client_key = proof_sent.verify_server_proof(m2.as_slice())?;
    println!("[client] server authenticated");

    assert_eq!(client_key, server_key);
    println!("shared session key: {:02x?}...", &client_key.as_slice()[..8]);

    Ok(())
}

//! End-to-end exercises of the authentication exchange, plus the negative
//! cases an implementation must reject.

use digest::Digest;
use num_bigint::BigUint;
use rand_core::OsRng;
use sha1::Sha1;
use sha2::{Sha256, Sha384};
use srp6a::utils::pad;
use srp6a::{Error, GroupId, SrpClient, SrpConfig, SrpKey, SrpServer};

/// Drive a full exchange; the password presented at login may differ from
/// the registered one.
fn run_exchange<D: Digest>(
    config: &SrpConfig<D>,
    username: &[u8],
    registered_password: &[u8],
    presented_password: &[u8],
) -> srp6a::Result<()> {
    let client = SrpClient::new(config);
    let server = SrpServer::new(config);

    let (salt, verifier) =
        client.generate_salt_and_verifier(&mut OsRng, username, registered_password);

    let login = client.begin_login(&mut OsRng);
    let session = server.begin_login(&mut OsRng, username, &salt, &verifier, login.public_key())?;

    let proof_sent =
        login.receive_server_key(username, presented_password, &salt, session.public_key())?;
    let m1 = proof_sent.proof().clone();

    let (m2, server_key) = session.receive_client_proof(m1.as_slice())?;
    let client_key = proof_sent.verify_server_proof(m2.as_slice())?;

    assert_eq!(client_key, server_key);
    Ok(())
}

#[test]
fn full_flow_sha256_n2048() {
    let config = SrpConfig::<Sha256>::predefined(GroupId::N2048);
    run_exchange(&config, b"adamfowler", b"testpassword", b"testpassword").unwrap();
}

#[test]
fn full_flow_sha1_n4096() {
    let config = SrpConfig::<Sha1>::predefined(GroupId::N4096);
    run_exchange(&config, b"adamfowler", b"testpassword", b"testpassword").unwrap();
}

#[test]
fn full_flow_custom_tiny_group() {
    // sanity only, nowhere near production sized
    let config = SrpConfig::<Sha384>::custom(BigUint::from(37u32), BigUint::from(3u32));
    run_exchange(&config, b"alice", b"password123", b"password123").unwrap();
}

#[test]
fn wrong_password_is_rejected_by_the_server() {
    let config = SrpConfig::<Sha256>::predefined(GroupId::N2048);
    let result = run_exchange(&config, b"adamfowler", b"testpassword", b"testpassw0rd");
    assert_eq!(result, Err(Error::InvalidClientProof));
}

#[test]
fn client_rejects_null_server_keys() {
    let config = SrpConfig::<Sha256>::predefined(GroupId::N2048);
    let client = SrpClient::new(&config);

    let (salt, _) = client.generate_salt_and_verifier(&mut OsRng, b"alice", b"password123");
    let keys = client.generate_keys(&mut OsRng);

    let zero = config.key_from_bytes(&[0]);
    let n = config.key_from_bytes(&config.n().to_bytes_be());
    let two_n = config.key_from_bytes(&(config.n() * 2u32).to_bytes_be());

    for b_pub in [zero, n, two_n] {
        let result =
            client.calculate_shared_secret(b"alice", b"password123", &salt, &keys, &b_pub);
        assert_eq!(result, Err(Error::NullServerKey));
    }
}

#[test]
fn server_rejects_null_client_keys() {
    let config = SrpConfig::<Sha256>::predefined(GroupId::N2048);
    let client = SrpClient::new(&config);
    let server = SrpServer::new(&config);

    let (salt, verifier) =
        client.generate_salt_and_verifier(&mut OsRng, b"alice", b"password123");

    let zero = config.key_from_bytes(&[0]);
    let n = config.key_from_bytes(&config.n().to_bytes_be());

    for a_pub in [zero, n] {
        let result = server.begin_login(&mut OsRng, b"alice", &salt, &verifier, &a_pub);
        assert!(matches!(result, Err(Error::NullClientKey)));
    }
}

#[test]
fn flipped_client_proof_is_rejected() {
    let config = SrpConfig::<Sha256>::predefined(GroupId::N2048);
    let client = SrpClient::new(&config);
    let server = SrpServer::new(&config);

    let (salt, verifier) =
        client.generate_salt_and_verifier(&mut OsRng, b"alice", b"password123");
    let login = client.begin_login(&mut OsRng);
    let session = server
        .begin_login(&mut OsRng, b"alice", &salt, &verifier, login.public_key())
        .unwrap();
    let proof_sent = login
        .receive_server_key(b"alice", b"password123", &salt, session.public_key())
        .unwrap();

    let mut m1 = proof_sent.proof().clone();
    m1[0] ^= 0x01;
    assert_eq!(
        session.receive_client_proof(m1.as_slice()),
        Err(Error::InvalidClientProof)
    );
}

#[test]
fn flipped_server_proof_is_rejected() {
    let config = SrpConfig::<Sha256>::predefined(GroupId::N2048);
    let client = SrpClient::new(&config);
    let server = SrpServer::new(&config);

    let (salt, verifier) =
        client.generate_salt_and_verifier(&mut OsRng, b"alice", b"password123");
    let login = client.begin_login(&mut OsRng);
    let session = server
        .begin_login(&mut OsRng, b"alice", &salt, &verifier, login.public_key())
        .unwrap();
    let proof_sent = login
        .receive_server_key(b"alice", b"password123", &salt, session.public_key())
        .unwrap();
    let m1 = proof_sent.proof().clone();
    let (mut m2, _) = session.receive_client_proof(m1.as_slice()).unwrap();

    m2[0] ^= 0x01;
    assert_eq!(
        proof_sent.verify_server_proof(m2.as_slice()),
        Err(Error::InvalidServerProof)
    );
}

#[test]
fn mutated_server_key_breaks_the_exchange() {
    let config = SrpConfig::<Sha256>::predefined(GroupId::N2048);
    let client = SrpClient::new(&config);
    let server = SrpServer::new(&config);

    let (salt, verifier) =
        client.generate_salt_and_verifier(&mut OsRng, b"alice", b"password123");
    let login = client.begin_login(&mut OsRng);
    let session = server
        .begin_login(&mut OsRng, b"alice", &salt, &verifier, login.public_key())
        .unwrap();

    // flip one bit of B in transit
    let mut b_bytes = session.public_key().to_padded_bytes();
    b_bytes[10] ^= 0x40;
    let tampered = config.key_from_bytes(&b_bytes);

    let proof_sent = login
        .receive_server_key(b"alice", b"password123", &salt, &tampered)
        .unwrap();
    let m1 = proof_sent.proof().clone();
    assert_eq!(
        session.receive_client_proof(m1.as_slice()),
        Err(Error::InvalidClientProof)
    );
}

#[test]
fn replayed_proof_fails_against_a_fresh_server_ephemeral() {
    let config = SrpConfig::<Sha256>::predefined(GroupId::N2048);
    let client = SrpClient::new(&config);
    let server = SrpServer::new(&config);

    let (salt, verifier) =
        client.generate_salt_and_verifier(&mut OsRng, b"alice", b"password123");

    // a successful session, as observed by an eavesdropper
    let login = client.begin_login(&mut OsRng);
    let a_pub = login.public_key().clone();
    let session = server
        .begin_login(&mut OsRng, b"alice", &salt, &verifier, &a_pub)
        .unwrap();
    let proof_sent = login
        .receive_server_key(b"alice", b"password123", &salt, session.public_key())
        .unwrap();
    let m1 = proof_sent.proof().clone();
    session.receive_client_proof(m1.as_slice()).unwrap();

    // replaying (A, M1) meets a fresh B, so u and S differ
    let replay_session = server
        .begin_login(&mut OsRng, b"alice", &salt, &verifier, &a_pub)
        .unwrap();
    assert_eq!(
        replay_session.receive_client_proof(m1.as_slice()),
        Err(Error::InvalidClientProof)
    );
}

#[test]
fn secrets_agree_over_repeated_random_sessions() {
    let config = SrpConfig::<Sha256>::predefined(GroupId::N1024);
    let client = SrpClient::new(&config);
    let server = SrpServer::new(&config);

    for i in 0..10u8 {
        let username = [b"user-".as_slice(), &[b'0' + i]].concat();
        let password = [b"hunter2-".as_slice(), &[b'0' + i]].concat();
        let (salt, verifier) =
            client.generate_salt_and_verifier(&mut OsRng, &username, &password);

        let client_keys = client.generate_keys(&mut OsRng);
        let server_keys = server.generate_keys(&mut OsRng, &verifier);

        let client_secret = client
            .calculate_shared_secret(
                &username,
                &password,
                &salt,
                &client_keys,
                server_keys.public(),
            )
            .unwrap();
        let server_secret = server
            .calculate_shared_secret(client_keys.public(), &server_keys, &verifier)
            .unwrap();

        assert_eq!(
            client_secret.to_padded_bytes(),
            server_secret.to_padded_bytes()
        );
        assert!(!client_secret.is_zero());
    }
}

#[test]
fn raw_password_variant_matches_empty_username() {
    let config = SrpConfig::<Sha256>::predefined(GroupId::N1024);
    let client = SrpClient::new(&config);
    let server = SrpServer::new(&config);

    let salt = b"fixed-salt-bytes";
    let verifier = client.compute_verifier(b"", b"secret-token", salt);
    let client_keys = client.generate_keys(&mut OsRng);
    let server_keys = server.generate_keys(&mut OsRng, &verifier);

    let raw = client
        .calculate_shared_secret_raw(b"secret-token", salt, &client_keys, server_keys.public())
        .unwrap();
    let named = client
        .calculate_shared_secret(b"", b"secret-token", salt, &client_keys, server_keys.public())
        .unwrap();
    assert_eq!(raw, named);
}

#[test]
fn padding_round_trip_laws() {
    let config = SrpConfig::<Sha256>::predefined(GroupId::N1024);
    let key = SrpKey::from_bytes(&[0x12, 0x34], config.pad_size());

    let padded = key.to_padded_bytes();
    assert_eq!(padded.len(), config.pad_size());
    assert_eq!(pad(&padded, config.pad_size()), padded);
    assert_eq!(
        SrpKey::from_bytes(&padded, config.pad_size()).to_padded_bytes(),
        padded
    );
    assert_eq!(
        SrpKey::from_hex(&key.to_hex(), config.pad_size()).unwrap(),
        key
    );
}

//! Integration tests for master-key setup, verification and rotation.

use bitvault::auth::{AuthState, Authenticator, Session, MIN_MASTER_KEY_LEN};
use bitvault::crypto::Cipher;
use bitvault::errors::BitVaultError;
use bitvault::storage::{KeyValueStore, MemoryStore, MASTER_KEY_HASH_KEY, PASSWORDS_KEY};
use bitvault::vault::{NewEntry, VaultStore};

#[test]
fn setup_then_verify() {
    let mut store = MemoryStore::new();
    let mut auth = Authenticator::new(&mut store);

    assert_eq!(auth.state().unwrap(), AuthState::Setup);
    auth.setup("hunter2hunter2", "hunter2hunter2").unwrap();
    assert_eq!(auth.state().unwrap(), AuthState::Verify);

    assert!(auth.verify("hunter2hunter2").is_ok());
    assert!(matches!(
        auth.verify("hunter2hunter3"),
        Err(BitVaultError::AuthenticationFailed)
    ));
    // Retries are unlimited.
    assert!(auth.verify("hunter2hunter2").is_ok());
}

#[test]
fn setup_rejects_short_key_without_writing() {
    let mut store = MemoryStore::new();
    let result = Authenticator::new(&mut store).setup("1234567", "1234567");

    assert!(matches!(
        result,
        Err(BitVaultError::MasterKeyTooShort { min }) if min == MIN_MASTER_KEY_LEN
    ));
    assert_eq!(store.write_count(), 0);
}

#[test]
fn setup_accepts_exactly_minimum_length() {
    let mut store = MemoryStore::new();
    assert!(Authenticator::new(&mut store)
        .setup("12345678", "12345678")
        .is_ok());
}

#[test]
fn setup_rejects_mismatched_confirmation() {
    let mut store = MemoryStore::new();
    let result = Authenticator::new(&mut store).setup("abcdefgh", "abcdefgi");
    assert!(matches!(result, Err(BitVaultError::PasswordMismatch)));
    assert!(!store.contains(MASTER_KEY_HASH_KEY));
}

#[test]
fn setup_twice_is_refused() {
    let mut store = MemoryStore::new();
    let mut auth = Authenticator::new(&mut store);
    auth.setup("first-key", "first-key").unwrap();

    assert!(matches!(
        auth.setup("second-key", "second-key"),
        Err(BitVaultError::VaultAlreadyInitialized)
    ));
    assert!(auth.verify("first-key").is_ok());
}

#[test]
fn verify_before_setup_reports_uninitialized() {
    let mut store = MemoryStore::new();
    let auth = Authenticator::new(&mut store);
    assert!(matches!(
        auth.verify("anything"),
        Err(BitVaultError::VaultNotInitialized)
    ));
}

#[test]
fn stored_record_is_a_hash_not_the_key() {
    let mut store = MemoryStore::new();
    Authenticator::new(&mut store)
        .setup("plain-master-key", "plain-master-key")
        .unwrap();

    let record = store.get(MASTER_KEY_HASH_KEY).unwrap().unwrap();
    assert_eq!(record.len(), 64);
    assert!(!record.contains("plain-master-key"));
}

#[test]
fn authenticate_dispatches_on_state() {
    let mut store = MemoryStore::new();
    let mut auth = Authenticator::new(&mut store);

    // SETUP needs the confirmation.
    assert!(matches!(
        auth.authenticate("abcdefgh", None),
        Err(BitVaultError::PasswordMismatch)
    ));
    auth.authenticate("abcdefgh", Some("abcdefgh")).unwrap();

    // VERIFY ignores it.
    auth.authenticate("abcdefgh", None).unwrap();
}

#[test]
fn session_locks_after_logout() {
    let mut store = MemoryStore::new();
    let key = Authenticator::new(&mut store)
        .setup("session-key", "session-key")
        .unwrap();

    let mut session = Session::new();
    assert!(matches!(session.key(), Err(BitVaultError::Locked)));

    session.login(key);
    assert!(session.is_authenticated());
    assert_eq!(session.key().unwrap().expose(), "session-key");

    session.logout();
    assert!(!session.is_authenticated());
    assert!(matches!(session.key(), Err(BitVaultError::Locked)));
}

#[test]
fn master_key_debug_is_redacted() {
    let mut store = MemoryStore::new();
    let key = Authenticator::new(&mut store)
        .setup("do-not-print", "do-not-print")
        .unwrap();
    assert!(!format!("{key:?}").contains("do-not-print"));
}

// ---------------------------------------------------------------------------
// Master-key change
// ---------------------------------------------------------------------------

#[test]
fn change_master_key_reencrypts_vault() {
    let mut vault = VaultStore::new(MemoryStore::new());
    let old_key = Authenticator::new(vault.storage_mut())
        .setup("old-master", "old-master")
        .unwrap();
    vault
        .add(NewEntry::new("Bank", "alice", "p1"), &old_key)
        .unwrap();
    let before = vault.list_all(&old_key).unwrap();

    let cipher = Cipher::default();
    let new_key = Authenticator::new(vault.storage_mut())
        .change_master_key(&cipher, "old-master", "new-master", "new-master")
        .unwrap();

    assert_eq!(vault.list_all(&new_key).unwrap(), before);

    let auth = Authenticator::new(vault.storage_mut());
    assert!(auth.verify("new-master").is_ok());
    assert!(auth.verify("old-master").is_err());
}

#[test]
fn change_master_key_with_wrong_old_key_writes_nothing() {
    let mut store = MemoryStore::new();
    Authenticator::new(&mut store)
        .setup("old-master", "old-master")
        .unwrap();
    let writes = store.write_count();

    let result = Authenticator::new(&mut store).change_master_key(
        &Cipher::default(),
        "not-the-key",
        "new-master",
        "new-master",
    );

    assert!(matches!(result, Err(BitVaultError::AuthenticationFailed)));
    assert_eq!(store.write_count(), writes);
    assert!(!store.contains(PASSWORDS_KEY));
}

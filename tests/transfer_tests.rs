//! Integration tests for JSON backup export and import.

use bitvault::auth::MasterKey;
use bitvault::errors::BitVaultError;
use bitvault::storage::MemoryStore;
use bitvault::vault::{backup_file_name, parse_document, NewEntry, VaultStore};
use chrono::NaiveDate;

fn vault_with_entries() -> (VaultStore<MemoryStore>, MasterKey) {
    let mut vault = VaultStore::new(MemoryStore::new());
    let key = MasterKey::new("transfer-key");

    let mut bank = NewEntry::new("Bank", "alice", "p1");
    bank.category = Some("Finance".into());
    vault.add(bank, &key).unwrap();

    let mut mail = NewEntry::new("Mail", "alice@example.com", "p2");
    mail.notes = Some("2FA on phone".into());
    vault.add(mail, &key).unwrap();

    (vault, key)
}

#[test]
fn export_then_import_leaves_vault_unchanged() {
    let (mut vault, key) = vault_with_entries();
    let before = vault.list_all(&key).unwrap();

    let document = vault.export(&key).unwrap();
    assert!(vault.import(&document, &key).unwrap());

    assert_eq!(vault.list_all(&key).unwrap(), before);
}

#[test]
fn export_is_pretty_camel_case_json() {
    let (vault, key) = vault_with_entries();
    let document = vault.export(&key).unwrap();

    assert!(document.starts_with("[\n  {"));
    assert!(document.contains("\"createdAt\""));
    assert!(document.contains("\"updatedAt\""));
    assert!(!document.contains("created_at"));
    // Absent optional fields are omitted.
    assert!(!document.contains("\"url\""));
}

#[test]
fn import_into_another_vault() {
    let (source, key) = vault_with_entries();
    let document = source.export(&key).unwrap();

    let mut target = VaultStore::new(MemoryStore::new());
    let other_key = MasterKey::new("other-key");
    assert!(target.import(&document, &other_key).unwrap());

    assert_eq!(
        target.list_all(&other_key).unwrap(),
        source.list_all(&key).unwrap()
    );
}

#[test]
fn import_replaces_rather_than_merges() {
    let (mut vault, key) = vault_with_entries();
    let document = r#"[{
        "id": "x1",
        "title": "Only",
        "username": "u",
        "password": "p",
        "createdAt": "2024-05-01T12:00:00.000Z",
        "updatedAt": "2024-05-01T12:00:00.000Z"
    }]"#;

    assert!(vault.import(document, &key).unwrap());

    let entries = vault.list_all(&key).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "x1");
}

#[test]
fn malformed_import_writes_nothing() {
    let (mut vault, key) = vault_with_entries();
    let before = vault.list_all(&key).unwrap();
    let writes = vault.storage().write_count();

    for document in ["", "not json", "{\"id\": 1}", "[{\"title\": \"missing fields\"}]"] {
        assert!(!vault.import(document, &key).unwrap(), "{document:?}");
    }

    assert_eq!(vault.storage().write_count(), writes);
    assert_eq!(vault.list_all(&key).unwrap(), before);
}

#[test]
fn empty_array_import_empties_the_vault() {
    let (mut vault, key) = vault_with_entries();
    assert!(vault.import("[]", &key).unwrap());
    assert!(vault.list_all(&key).unwrap().is_empty());
}

#[test]
fn parse_document_reports_errors() {
    assert!(matches!(
        parse_document("{"),
        Err(BitVaultError::ImportParse(_))
    ));
    assert!(parse_document("[]").unwrap().is_empty());
}

#[test]
fn backup_name_uses_iso_date() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    assert_eq!(backup_file_name(date), "bitvault_backup_2024-03-07.json");
}

#[test]
fn imported_entries_read_back_exactly_as_parsed() {
    let (mut vault, key) = vault_with_entries();
    let document = r#"[{"id":"a1","title":"Bank","username":"alice","password":"p1",
        "createdAt":"2024-05-01T12:00:00.123456Z","updatedAt":"2024-05-02T08:30:00.987654321Z"}]"#;

    assert!(vault.import(document, &key).unwrap());
    assert_eq!(vault.list_all(&key).unwrap(), parse_document(document).unwrap());
}

use super::*;
use crate::repo::tests::setup_test_db;

#[test]
fn test_get_auth_when_signed_out() {
    let pool = setup_test_db();
    assert!(get_auth(&pool).unwrap().is_none());
}

#[test]
fn test_save_and_get_auth() {
    let pool = setup_test_db();

    let saved = save_auth(&pool, "student@example.com".to_string()).unwrap();
    assert_eq!(saved.get_email(), "student@example.com");

    let stored = get_auth(&pool).unwrap().unwrap();
    assert_eq!(stored, saved);
}

#[test]
fn test_save_auth_replaces_previous_record() {
    let pool = setup_test_db();

    save_auth(&pool, "first@example.com".to_string()).unwrap();
    save_auth(&pool, "second@example.com".to_string()).unwrap();

    let stored = get_auth(&pool).unwrap().unwrap();
    assert_eq!(stored.get_email(), "second@example.com");
}

#[test]
fn test_clear_auth() {
    let pool = setup_test_db();

    save_auth(&pool, "student@example.com".to_string()).unwrap();
    clear_auth(&pool).unwrap();

    assert!(get_auth(&pool).unwrap().is_none());
}

#[test]
fn test_clear_auth_when_already_signed_out() {
    let pool = setup_test_db();
    assert!(clear_auth(&pool).is_ok());
}

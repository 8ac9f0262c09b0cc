use super::*;

#[test]
fn default_keys_match_frontend_names() {
    let keys = StorageKeys::default();
    assert_eq!(keys.user, "user");
    assert_eq!(keys.credential, "access_token");
}

#[test]
fn prefixed_keys_namespace_both_entries() {
    let keys = StorageKeys::with_prefix("bookshare.");
    assert_eq!(keys.user, "bookshare.user");
    assert_eq!(keys.credential, "bookshare.access_token");
}

#[test]
fn empty_prefix_equals_default() {
    assert_eq!(StorageKeys::with_prefix(""), StorageKeys::default());
}

#[test]
fn rejected_error_names_op_and_key() {
    let err = StorageError::Rejected { op: "set", key: "user".to_owned(), message: "QuotaExceeded".to_owned() };
    assert_eq!(err.to_string(), "storage set failed for key `user`: QuotaExceeded");
}

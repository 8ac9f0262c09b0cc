use super::*;

#[test]
fn get_missing_key_is_none() {
    let backend = MemoryBackend::new();
    assert_eq!(backend.get("user").unwrap(), None);
    assert!(backend.is_empty());
}

#[test]
fn set_then_get_returns_value() {
    let backend = MemoryBackend::new();
    backend.set("access_token", "tok-1").unwrap();
    assert_eq!(backend.get("access_token").unwrap().as_deref(), Some("tok-1"));
    assert!(backend.contains("access_token"));
}

#[test]
fn set_overwrites_previous_value() {
    let backend = MemoryBackend::new();
    backend.set("k", "a").unwrap();
    backend.set("k", "b").unwrap();
    assert_eq!(backend.get("k").unwrap().as_deref(), Some("b"));
    assert_eq!(backend.len(), 1);
}

#[test]
fn remove_absent_key_succeeds() {
    let backend = MemoryBackend::new();
    assert!(backend.remove("nope").is_ok());
    backend.set("k", "v").unwrap();
    backend.remove("k").unwrap();
    backend.remove("k").unwrap();
    assert!(!backend.contains("k"));
}

#[test]
fn clones_share_contents() {
    let a = MemoryBackend::new();
    let b = a.clone();
    a.set("k", "v").unwrap();
    assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
    b.remove("k").unwrap();
    assert!(a.is_empty());
}

use super::*;

#[test]
fn test_intern_roundtrip() {
    let interner = StringInterner::new();
    let name = interner.intern("hello");
    assert_eq!(interner.lookup(name), "hello");
}

#[test]
fn test_intern_dedup() {
    let interner = StringInterner::new();
    let a = interner.intern("value");
    let b = interner.intern("value");
    assert_eq!(a, b);
    assert_eq!(interner.len(), 2);
}

#[test]
fn test_empty_is_preinterned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_get_does_not_intern() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("missing"), None);
    assert_eq!(interner.len(), 1);
    let name = interner.intern("present");
    assert_eq!(interner.get("present"), Some(name));
}

#[test]
fn test_shared_interner_clones_share_table() {
    let shared = SharedInterner::new();
    let other = shared.clone();
    let name = shared.intern("kotlin");
    assert_eq!(other.lookup(name), "kotlin");
}

#[test]
fn test_unknown_name_is_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(999)), "");
}

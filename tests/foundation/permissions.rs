//! Integration tests for Permission
//!
//! Tests the access predicates and string round-tripping.

use coffer_foundation::{Error, Permission};

// =============================================================================
// Access Predicates
// =============================================================================

#[test]
fn rw_passes_both() {
    assert!(Permission::ReadWrite.allows_read());
    assert!(Permission::ReadWrite.allows_write());
}

#[test]
fn none_passes_neither() {
    assert!(!Permission::None.allows_read());
    assert!(!Permission::None.allows_write());
}

#[test]
fn r_and_w_are_one_sided() {
    assert!(Permission::Read.allows_read());
    assert!(!Permission::Read.allows_write());
    assert!(Permission::Write.allows_write());
    assert!(!Permission::Write.allows_read());
}

// =============================================================================
// Parsing and Display
// =============================================================================

#[test]
fn canonical_strings() {
    assert_eq!(Permission::None.as_str(), "none");
    assert_eq!(Permission::Read.as_str(), "r");
    assert_eq!(Permission::Write.as_str(), "w");
    assert_eq!(Permission::ReadWrite.as_str(), "rw");
}

#[test]
fn parse_round_trip() {
    for perm in [
        Permission::None,
        Permission::Read,
        Permission::Write,
        Permission::ReadWrite,
    ] {
        let parsed: Permission = perm.as_str().parse().unwrap();
        assert_eq!(parsed, perm);
        assert_eq!(format!("{perm}"), perm.as_str());
    }
}

#[test]
fn parse_rejects_unknown() {
    assert!("readwrite".parse::<Permission>().is_err());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn error_carries_property_name() {
    let err = Error::read_not_allowed("secret");
    assert_eq!(err.property(), "secret");
    assert_eq!(format!("{err}"), "read not allowed: secret");

    let err = Error::write_not_allowed("secret");
    assert_eq!(err.property(), "secret");
    assert_eq!(format!("{err}"), "write not allowed: secret");
}

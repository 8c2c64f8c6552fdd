//! Integration Test: No panicking unwraps
//!
//! Production code propagates errors. `unwrap()` and `expect()` are for
//! tests only.

use architectural_enforcement::{is_panicking_unwrap, scan};

#[test]
fn test_no_unwrap_in_production_code() {
    let violations = scan(&["conductor/core/src", "tui/src"], |_, _, _, code| {
        is_panicking_unwrap(code)
    });

    for violation in &violations {
        eprintln!("  panicking unwrap: {violation}");
    }
    assert!(
        violations.is_empty(),
        "found {} unwrap/expect call(s) in production code",
        violations.len()
    );
}

#[test]
fn test_sources_are_found() {
    // Guards against the scanners silently passing on an empty tree
    assert!(!architectural_enforcement::rust_sources("conductor/core/src").is_empty());
    assert!(!architectural_enforcement::rust_sources("tui/src").is_empty());
}

//! Integration Test: Headless Conductor
//!
//! The Conductor owns all correction state and must stay usable without a
//! terminal. UI crates belong to the TUI surface only.

use std::fs;

use architectural_enforcement::{scan, uses_terminal_crate, workspace_root};

#[test]
fn test_conductor_sources_do_not_touch_terminal_crates() {
    let violations = scan(&["conductor/core/src"], |_, _, _, code| {
        uses_terminal_crate(code)
    });

    for violation in &violations {
        eprintln!("  terminal crate in conductor: {violation}");
    }
    assert!(violations.is_empty());
}

#[test]
fn test_conductor_manifest_has_no_terminal_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("conductor/core/Cargo.toml"))
        .expect("conductor manifest should be readable");

    for line in manifest.lines().map(str::trim) {
        assert!(
            !line.starts_with("ratatui") && !line.starts_with("crossterm"),
            "conductor depends on a terminal crate: {line}"
        );
    }
}

#[test]
fn test_tui_depends_on_conductor() {
    let manifest = fs::read_to_string(workspace_root().join("tui/Cargo.toml"))
        .expect("tui manifest should be readable");
    assert!(manifest.contains("clarify-conductor"));
}

//! Integration Test: Sleep Prohibition
//!
//! Production code waits on I/O, channels or timers driven by `select!`.
//! The only permitted sleeps pace the TUI frame loop.

use architectural_enforcement::{is_frame_pacing_context, is_sleep_call, scan};

/// Files allowed to sleep for frame pacing
const FRAME_PACERS: &[&str] = &["app.rs"];

#[test]
fn test_no_sleep_in_conductor() {
    let violations = scan(&["conductor/core/src"], |_, _, _, code| is_sleep_call(code));

    for violation in &violations {
        eprintln!("  sleep in conductor: {violation}");
    }
    assert!(
        violations.is_empty(),
        "found {} sleep call(s) in the Conductor",
        violations.len()
    );
}

#[test]
fn test_tui_only_sleeps_for_frame_pacing() {
    let violations = scan(&["tui/src"], |path, lines, idx, code| {
        if !is_sleep_call(code) {
            return false;
        }
        let is_pacer = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| FRAME_PACERS.contains(&name));
        !(is_pacer && is_frame_pacing_context(lines, idx, 12))
    });

    for violation in &violations {
        eprintln!("  sleep outside frame pacing: {violation}");
    }
    assert!(
        violations.is_empty(),
        "found {} sleep call(s) outside the frame loop",
        violations.len()
    );
}

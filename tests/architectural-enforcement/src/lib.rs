//! Architectural Enforcement Integration Tests
//!
//! Source scanners used by the tests in `tests/` to keep the workspace honest:
//! - No sleeping in production code outside the TUI frame pacer
//! - The Conductor stays headless (no terminal crates)
//! - No `unwrap()`/`expect()` in production code
//!
//! Scanning is line based. Everything from the first `#[cfg(test)]` in a
//! file onwards counts as test code, and `//` comments are ignored.

use std::fs;
use std::path::{Path, PathBuf};

/// A rule hit: file, 1-based line number and the offending line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: PathBuf,
    pub line: usize,
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line, self.text)
    }
}

/// Root of the workspace this crate lives in
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// All `.rs` files under `dir` (relative to the workspace root)
pub fn rust_sources(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Production lines of a source file as `(index, code)` pairs
///
/// Stops at the first `#[cfg(test)]` and strips `//` comments.
pub fn production_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .map(|(idx, line)| (idx, line.split("//").next().unwrap_or(line)))
        .filter(|(_, code)| !code.trim().is_empty())
        .collect()
}

/// Whether a line of code calls any kind of sleep
pub fn is_sleep_call(code: &str) -> bool {
    code.contains("::sleep(") || code.contains(".sleep(") || code.contains("sleep_until(")
}

/// Whether a line mentions frame pacing within `radius` lines of `idx`
pub fn is_frame_pacing_context(lines: &[&str], idx: usize, radius: usize) -> bool {
    let start = idx.saturating_sub(radius);
    let end = (idx + radius + 1).min(lines.len());
    lines[start..end]
        .iter()
        .any(|line| line.to_lowercase().contains("frame"))
}

/// Whether a line of code panics on `None`/`Err`
pub fn is_panicking_unwrap(code: &str) -> bool {
    code.contains(".unwrap()") || code.contains(".expect(")
}

/// Whether a line of code reaches for a terminal crate
pub fn uses_terminal_crate(code: &str) -> bool {
    ["ratatui::", "crossterm::", "use ratatui", "use crossterm"]
        .iter()
        .any(|needle| code.contains(needle))
}

/// Run `check` over the production lines of every source file under `dirs`
pub fn scan<F>(dirs: &[&str], mut check: F) -> Vec<Violation>
where
    F: FnMut(&Path, &[&str], usize, &str) -> bool,
{
    let mut violations = Vec::new();
    for dir in dirs {
        for path in rust_sources(dir) {
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            let all_lines: Vec<&str> = content.lines().collect();
            for (idx, code) in production_lines(&content) {
                if check(&path, &all_lines, idx, code) {
                    violations.push(Violation {
                        path: path.clone(),
                        line: idx + 1,
                        text: all_lines[idx].trim().to_string(),
                    });
                }
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let content = "fn a() {\n    // note\n    b(); // trailing\n}\n#[cfg(test)]\nmod tests {\n    fn c() { d().unwrap(); }\n}\n";
        let lines = production_lines(content);
        let code: Vec<&str> = lines.iter().map(|(_, c)| c.trim()).collect();
        assert_eq!(code, vec!["fn a() {", "b();", "}"]);
    }

    #[test]
    fn test_sleep_detection() {
        assert!(is_sleep_call("    tokio::time::sleep(Duration::from_millis(10)).await;"));
        assert!(is_sleep_call("    std::thread::sleep(d);"));
        assert!(!is_sleep_call("    let asleep = true;"));
    }

    #[test]
    fn test_frame_pacing_detection() {
        let lines = vec![
            "let frame_start = Instant::now();",
            "render();",
            "tokio::time::sleep(budget - elapsed).await;",
        ];
        assert!(is_frame_pacing_context(&lines, 2, 5));
        assert!(!is_frame_pacing_context(&lines, 2, 0));
    }

    #[test]
    fn test_unwrap_detection() {
        assert!(is_panicking_unwrap("let x = y.unwrap();"));
        assert!(is_panicking_unwrap("let x = y.expect(\"boom\");"));
        assert!(!is_panicking_unwrap("let x = y.unwrap_or_default();"));
        assert!(!is_panicking_unwrap("let x = y.unwrap_or(0);"));
    }

    #[test]
    fn test_terminal_crate_detection() {
        assert!(uses_terminal_crate("use ratatui::widgets::Paragraph;"));
        assert!(uses_terminal_crate("crossterm::terminal::enable_raw_mode()?;"));
        assert!(!uses_terminal_crate("let surface = SurfaceType::Tui;"));
    }
}

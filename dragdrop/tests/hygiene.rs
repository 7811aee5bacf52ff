//! Hygiene budgets for the dragdrop library sources.
//!
//! Each pattern below has a ceiling (ideally zero) on how often it may appear
//! in non-test code under `src/`. Lowering a ceiling is always fine; raising
//! one means removing an existing hit first.

use std::fs;
use std::path::{Path, PathBuf};

/// Non-test `.rs` files under `dir`, with their contents.
fn library_sources(dir: &Path) -> Vec<(PathBuf, String)> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            out.extend(library_sources(&path));
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.file_stem().is_some_and(|s| s.to_string_lossy().ends_with("_test"));
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
    out
}

/// Lines containing `pattern`, minus lines that only match because they
/// contain one of `unless` (e.g. `println!(` inside `eprintln!(`).
fn hits(pattern: &str, unless: &[&str]) -> Vec<(PathBuf, usize)> {
    library_sources(Path::new("src"))
        .into_iter()
        .filter_map(|(path, content)| {
            let n = content
                .lines()
                .filter(|line| line.contains(pattern) && !unless.iter().any(|u| line.contains(u)))
                .count();
            (n > 0).then_some((path, n))
        })
        .collect()
}

fn check(pattern: &str, unless: &[&str], max: usize, hint: &str) {
    let found = hits(pattern, unless);
    let count: usize = found.iter().map(|(_, n)| n).sum();
    let listing: Vec<String> = found.iter().map(|(p, n)| format!("  {}: {n}", p.display())).collect();
    assert!(count <= max, "`{pattern}` budget exceeded: found {count}, max {max}. {hint}\n{}", listing.join("\n"));
}

macro_rules! budget {
    ($name:ident, $pattern:expr, [$($unless:expr),*], $max:expr, $hint:expr) => {
        #[test]
        fn $name() {
            check($pattern, &[$($unless),*], $max, $hint);
        }
    };
    ($name:ident, $pattern:expr, $max:expr, $hint:expr) => {
        budget!($name, $pattern, [], $max, $hint);
    };
}

// Panics.
budget!(unwrap_budget, ".unwrap()", 0, "Propagate with `?` or handle the None/Err.");
budget!(expect_budget, ".expect(", 0, "Propagate with `?` or handle the None/Err.");
budget!(panic_budget, "panic!(", 0, "Return a DragError instead.");
budget!(unreachable_budget, "unreachable!(", 0, "Make the state unrepresentable.");
budget!(todo_budget, "todo!(", 0, "Finish the stub.");
budget!(unimplemented_budget, "unimplemented!(", 0, "Finish the stub.");

// Silently discarded results.
budget!(silent_discard_budget, "let _ =", 0, "Inspect the value or log it.");
budget!(dot_ok_budget, ".ok()", 0, "Match on the error instead.");

// Structure.
budget!(allow_dead_code_budget, "#[allow(dead_code)]", 0, "Delete the code.");

// Output belongs to `tracing`.
budget!(println_budget, "println!(", ["eprintln!("], 0, "Use tracing.");
budget!(eprintln_budget, "eprintln!(", 0, "Use tracing.");
budget!(dbg_budget, "dbg!(", 0, "Use tracing.");

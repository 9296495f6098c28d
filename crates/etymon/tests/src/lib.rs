//! Shared fixtures for the etymon cross-crate tests.
//!
//! Sample inputs live in `data/`:
//!
//! - `sample.tree` / `sample.descent`: one family, numbered languages,
//!   one borrowing
//! - `germanic.tree` / `take.descent`: Germanic and Romance families with
//!   contact edges, three concept anchors, one cross-family loan

use std::path::{Path, PathBuf};

/// Directory holding the sample inputs.
pub fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn data_path(name: &str) -> PathBuf {
    data_dir().join(name)
}

pub fn read_data(name: &str) -> std::io::Result<String> {
    std::fs::read_to_string(data_path(name))
}

/// Clamp raw depths so every line is at most one level deeper than the
/// one before it; the first line is at depth 0.
pub fn normalize_depths(raw: &[usize]) -> Vec<usize> {
    let mut depths = Vec::with_capacity(raw.len());
    let mut previous: Option<usize> = None;
    for &depth in raw {
        let depth = match previous {
            None => 0,
            Some(p) => depth.min(p + 1),
        };
        depths.push(depth);
        previous = Some(depth);
    }
    depths
}

/// Render `(depth, content)` pairs as an indented file, one space per level.
pub fn render_indented<S: AsRef<str>>(lines: &[(usize, S)]) -> String {
    let mut out = String::new();
    for (depth, content) in lines {
        out.push_str(&" ".repeat(*depth));
        out.push_str(content.as_ref());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depths_never_jump() {
        assert_eq!(normalize_depths(&[3, 5, 1, 0, 2]), vec![0, 1, 1, 0, 1]);
        assert!(normalize_depths(&[]).is_empty());
    }

    #[test]
    fn renders_one_space_per_level() {
        let text = render_indented(&[(0, "A"), (1, "B"), (2, "C")]);
        assert_eq!(text, "A\n B\n  C\n");
    }

    #[test]
    fn sample_data_is_present() {
        for name in ["sample.tree", "sample.descent", "germanic.tree", "take.descent"] {
            assert!(data_path(name).exists(), "{name} missing");
        }
    }
}

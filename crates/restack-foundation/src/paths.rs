//! Helpers for the slash-normalized relative paths used across the pipeline.
//!
//! Records carry paths as `String`s with `/` separators so that output is
//! byte-identical across platforms and runs. These free functions are the
//! only place path-segment logic lives.

/// Final path segment (the basename).
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Directory portion of the path, or `""` for a root-level file.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Extension including the leading dot, lower-cased check left to callers.
/// Returns `""` when there is none (dotfiles like `.env` have no extension).
pub fn extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}

/// Join a directory and a basename; an empty directory yields the basename.
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Directory components of a path (everything but the basename).
pub fn dir_components(path: &str) -> impl Iterator<Item = &str> {
    let dir = parent_dir(path);
    dir.split('/').filter(|c| !c.is_empty())
}

/// First path component, or `None` for a root-level file.
pub fn first_component(path: &str) -> Option<&str> {
    if path.contains('/') {
        path.split('/').next()
    } else {
        None
    }
}

/// Pop `n` trailing components off a directory path, saturating at the root.
pub fn pop_components(dir: &str, n: u32) -> &str {
    let mut current = dir;
    for _ in 0..n {
        current = parent_dir(current);
        if current.is_empty() {
            break;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn file_name_and_parent() {
        assert_eq!(file_name("src/pkg/mod.py"), "mod.py");
        assert_eq!(file_name("main.py"), "main.py");
        assert_eq!(parent_dir("src/pkg/mod.py"), "src/pkg");
        assert_eq!(parent_dir("main.py"), "");
    }

    #[test]
    fn extension_handles_dotfiles() {
        assert_eq!(extension("a/b/util.py"), ".py");
        assert_eq!(extension(".env"), "");
        assert_eq!(extension("Makefile"), "");
        assert_eq!(extension("archive.tar.gz"), ".gz");
    }

    #[test]
    fn join_root_dir() {
        assert_eq!(join("", "main.py"), "main.py");
        assert_eq!(join("src", "main.py"), "src/main.py");
    }

    #[test]
    fn pop_components_saturates() {
        assert_eq!(pop_components("a/b/c", 1), "a/b");
        assert_eq!(pop_components("a/b/c", 3), "");
        assert_eq!(pop_components("a", 5), "");
    }

    #[test]
    fn first_component_root_file_is_none() {
        assert_eq!(first_component("main.py"), None);
        assert_eq!(first_component("tests/test_x.py"), Some("tests"));
    }
}

//! Path string helpers: fragment splitting and home-directory shorthand.

use std::path::{Path, MAIN_SEPARATOR};

/// A typed path fragment split at its last separator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathFragment {
    /// Everything up to and including the last separator. Empty when the
    /// fragment holds no separator at all.
    pub directory: String,

    /// The remainder after the last separator, possibly empty.
    pub basename: String,
}

impl PathFragment {
    /// Splits `text` at its last path separator.
    pub fn split(text: &str) -> PathFragment {
        match text.rfind(MAIN_SEPARATOR) {
            Some(idx) => PathFragment {
                directory: text[..=idx].to_string(),
                basename: text[idx + 1..].to_string(),
            },
            None => PathFragment {
                directory: String::new(),
                basename: text.to_string(),
            },
        }
    }

    /// Byte offset where the basename begins, for caret-relative
    /// replacement in the prompt.
    pub fn basename_start(&self) -> usize {
        self.directory.len()
    }

    /// Joins a completion candidate back onto the directory part.
    pub fn join(&self, candidate: &str) -> String {
        format!("{}{}", self.directory, candidate)
    }
}

/// Expands a leading `~` to the user's home directory. Paths without the
/// shorthand, or environments without a known home, pass through unchanged.
pub fn expand_homedir(path: &str) -> String {
    match dirs::home_dir() {
        Some(home) => expand_with_home(path, &home),
        None => path.to_string(),
    }
}

/// Replaces a home-directory prefix with `~` for display.
pub fn abbr_homedir(path: &str) -> String {
    match dirs::home_dir() {
        Some(home) => abbr_with_home(path, &home),
        None => path.to_string(),
    }
}

fn expand_with_home(path: &str, home: &Path) -> String {
    let shorthand = format!("~{}", MAIN_SEPARATOR);
    if let Some(rest) = path.strip_prefix(&shorthand) {
        format!("{}{}", ensure_trailing_sep(&home.display().to_string()), rest)
    } else if path == "~" {
        home.display().to_string()
    } else {
        path.to_string()
    }
}

fn abbr_with_home(path: &str, home: &Path) -> String {
    let home = ensure_trailing_sep(&home.display().to_string());
    let shorthand = format!("~{}", MAIN_SEPARATOR);
    path.replace(&home, &shorthand)
}

/// Appends a path separator when one is missing.
pub fn ensure_trailing_sep(path: &str) -> String {
    if path.ends_with(MAIN_SEPARATOR) {
        path.to_string()
    } else {
        format!("{}{}", path, MAIN_SEPARATOR)
    }
}

/// Appends a separator only when the path names an existing directory, so
/// confirmed directory paths normalize but file paths stay untouched.
pub fn trailing_sep_if_dir(path: &str) -> String {
    if Path::new(path).is_dir() {
        ensure_trailing_sep(path)
    } else {
        path.to_string()
    }
}

//! Path-string utilities.
//!
//! Paths are plain strings of the form `{scheme}://{body}`. A missing
//! scheme means `file`. A trailing `/` denotes a directory; a trailing
//! `*` denotes a glob pattern (`**` for recursive descent). All functions
//! here are pure and infallible; empty results are valid, not errors.

const DELIMITER: &str = "://";

/// Extract the scheme token of a path: the substring before the first
/// `"://"`, or `"file"` when no delimiter is present.
pub fn scheme_of(path: &str) -> &str {
    match path.find(DELIMITER) {
        Some(pos) => &path[..pos],
        None => "file",
    }
}

/// Strip the scheme prefix of a path: the substring after the first
/// `"://"`, or the path unchanged when no delimiter is present.
pub fn strip_scheme(path: &str) -> &str {
    match path.find(DELIMITER) {
        Some(pos) => &path[pos + DELIMITER.len()..],
        None => path,
    }
}

/// Extension of the final path component: the substring after its last
/// `.`, or empty when the component has no dot.
pub fn extension_of(path: &str) -> &str {
    let name = basename(path);
    match name.rfind('.') {
        Some(pos) => &name[pos + 1..],
        None => "",
    }
}

/// Path with the substring after the last `.` removed; unchanged when no
/// dot is present.
pub fn strip_extension(path: &str) -> &str {
    match path.rfind('.') {
        Some(pos) => &path[..pos],
        None => path,
    }
}

/// Final path component: the substring after the last `/`, or the whole
/// path when it contains no slash.
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Everything up to and including the last `/`; empty when the path
/// contains no slash.
pub fn non_basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[..pos + 1],
        None => "",
    }
}

/// A trailing `/` marks a directory path.
pub fn is_directory(path: &str) -> bool {
    path.ends_with('/')
}

/// Drop any trailing `*` characters, leaving the directory portion of a
/// glob pattern (`"dir/**"` becomes `"dir/"`).
pub fn strip_postfixing(path: &str) -> &str {
    path.trim_end_matches('*')
}

/// Replace a leading `~` with the home directory, when one is set.
pub fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return format!("{}{}", home, &path[1..]);
        }
    }
    path.to_string()
}

/// The system temporary directory, as a path string.
pub fn temp_path() -> String {
    std::env::temp_dir().to_string_lossy().into_owned()
}

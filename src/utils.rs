//! Path helpers.

use std::path::PathBuf;

/// Joins `name` to `dir_path`.
///
/// Non UTF-8 characters are replaced, see [`std::path::Path::to_string_lossy`].
///
/// # Examples
///
/// ```
/// let path = get_path("/var/lib/herald", "playtesters");
/// assert_eq!(path, "/var/lib/herald/playtesters");
/// ```
pub fn get_path(dir_path: &str, name: &str) -> String {
    let path: PathBuf = [dir_path, name].iter().collect();
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_path() {
        #[cfg(unix)]
        assert_eq!(get_path("/var/lib/herald", "session"), "/var/lib/herald/session");
        #[cfg(windows)]
        assert_eq!(get_path("/var/lib/herald", "session"), "\\var\\lib\\herald\\session");
    }

    #[test]
    fn test_get_path_relative() {
        #[cfg(unix)]
        assert_eq!(get_path(".", "playtesters"), "./playtesters");
        #[cfg(windows)]
        assert_eq!(get_path(".", "playtesters"), ".\\playtesters");
    }

    #[test]
    fn test_get_path_nested() {
        let base = get_path("data", "herald");
        #[cfg(unix)]
        assert_eq!(get_path(&base, "session"), "data/herald/session");
    }
}

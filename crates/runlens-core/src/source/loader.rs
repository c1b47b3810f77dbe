use std::fs;
use std::path::Path;

/// Tolerant reader for run artifacts.
///
/// Capture tools leave partial run directories behind all the time, so a
/// missing or unreadable file is reported as empty text instead of an error.
pub struct TextLoader;

impl TextLoader {
    /// Read a file as text, returning an empty string on any failure.
    ///
    /// Invalid UTF-8 sequences are replaced rather than failing the whole
    /// file, since device logs regularly contain stray binary bytes.
    pub fn read_text(path: &Path) -> String {
        match fs::read(path) {
            Ok(bytes) => {
                tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
                String::from_utf8_lossy(&bytes).into_owned()
            }
            Err(err) => {
                tracing::debug!("Could not read {}: {}", path.display(), err);
                String::new()
            }
        }
    }

    /// Return the content of the first candidate in `dir` that reads as
    /// non-empty text, or an empty string if none do.
    pub fn first_non_empty<S: AsRef<str>>(dir: &Path, candidates: &[S]) -> String {
        for name in candidates {
            let path = dir.join(name.as_ref());
            let text = Self::read_text(&path);
            if !text.is_empty() {
                tracing::debug!("Using {} as source", path.display());
                return text;
            }
        }

        tracing::debug!("No non-empty candidate found in {}", dir.display());
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let text = TextLoader::read_text(&dir.path().join("nope.txt"));
        assert_eq!(text, "");
    }

    #[test]
    fn test_read_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(TextLoader::read_text(dir.path()), "");
    }

    #[test]
    fn test_read_invalid_utf8_keeps_valid_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dump.txt");
        fs::write(&path, b"MemFree: 10 kB\xff\xfe\n").unwrap();

        let text = TextLoader::read_text(&path);
        assert!(text.contains("MemFree: 10 kB"));
    }

    #[test]
    fn test_first_non_empty_skips_missing_and_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("c.txt"), "third").unwrap();
        fs::write(dir.path().join("d.txt"), "fourth").unwrap();

        let text = TextLoader::first_non_empty(dir.path(), &["a.txt", "b.txt", "c.txt", "d.txt"]);
        assert_eq!(text, "third");
    }

    #[test]
    fn test_first_non_empty_prefers_primary() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("primary.txt"), "primary").unwrap();
        fs::write(dir.path().join("fallback.txt"), "fallback").unwrap();

        let text = TextLoader::first_non_empty(dir.path(), &["primary.txt", "fallback.txt"]);
        assert_eq!(text, "primary");
    }

    #[test]
    fn test_first_non_empty_all_missing() {
        let dir = TempDir::new().unwrap();
        let text = TextLoader::first_non_empty(dir.path(), &["a.txt", "b.txt"]);
        assert!(text.is_empty());
    }
}

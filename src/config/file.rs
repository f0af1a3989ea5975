//! File-based properties source.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::properties::{self, Properties};
use super::source::PropertySource;
use super::ConfigError;

/// A properties file on disk.
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist are silently skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, the build will fail if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl PropertySource for FileSource {
    fn load(&self) -> Result<Option<Properties>, ConfigError> {
        let Some(contents) = read_optional(&self.path, self.required)? else {
            debug!(path = %self.path.display(), "optional properties file absent");
            return Ok(None);
        };

        let props = properties::parse(&self.path.display().to_string(), &contents)?;
        debug!(path = %self.path.display(), keys = props.len(), "properties file loaded");
        Ok(Some(props))
    }
}

/// Reads a file to a string.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
pub(super) fn read_optional(path: &Path, required: bool) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_loads_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "tokenEndpoint = https://example.com/token").unwrap();

        let source = FileSource::new(file.path(), true);
        let props = source.load().unwrap().unwrap();

        assert_eq!(props.len(), 1);
        assert_eq!(
            props.get("tokenEndpoint").map(String::as_str),
            Some("https://example.com/token")
        );
    }

    #[test]
    fn test_file_source_required_missing() {
        let source = FileSource::new("/nonexistent/path/connection.properties", true);
        let result = source.load();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_file_source_optional_missing() {
        let source = FileSource::new("/nonexistent/path/connection.properties", false);
        let loaded = source.load().unwrap();

        assert!(loaded.is_none());
    }

    #[test]
    fn test_file_source_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path(), true);

        assert!(matches!(source.load(), Err(ConfigError::ReadError { .. })));
    }
}

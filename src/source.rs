//! Source file validation and reading.

use crate::error::{PydeltaError, Result};
use std::fs;
use std::path::Path;

/// Checks that `path` names an existing regular file with one of
/// `extensions` (compared case-insensitively, without dots).
pub fn validate_source(path: &Path, extensions: &[String]) -> Result<()> {
    if !path.exists() {
        return Err(PydeltaError::InvalidSource(format!(
            "'{}' does not exist",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(PydeltaError::InvalidSource(format!(
            "'{}' is not a file",
            path.display()
        )));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !extensions.iter().any(|allowed| allowed.to_lowercase() == ext) {
        return Err(PydeltaError::InvalidSource(format!(
            "'{}' is not a source file (expected extension: {})",
            path.display(),
            extensions.join(", ")
        )));
    }

    Ok(())
}

/// Reads a UTF-8 file as lines without their terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        PydeltaError::InvalidSource(format!("failed to read '{}': {}", path.display(), e))
    })?;
    Ok(split_lines(&content))
}

/// Splits text on `\n`, dropping a trailing `\r` from each line.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// File name without directories, as used for metrics keys.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn py() -> Vec<String> {
        vec!["py".to_string()]
    }

    #[test]
    fn test_accepts_python_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("calc.py");
        fs::write(&path, "x = 1\n").unwrap();

        assert!(validate_source(&path, &py()).is_ok());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("CALC.PY");
        fs::write(&path, "x = 1\n").unwrap();

        assert!(validate_source(&path, &py()).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gone.py");

        let err = validate_source(&path, &py()).unwrap_err();
        assert_eq!(err.exit_code(), crate::exit_codes::INVALID_SOURCE);
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_directory_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pkg.py");
        fs::create_dir(&path).unwrap();

        let err = validate_source(&path, &py()).unwrap_err();
        assert!(err.to_string().contains("is not a file"));
    }

    #[test]
    fn test_wrong_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "hello\n").unwrap();

        let err = validate_source(&path, &py()).unwrap_err();
        assert!(err.to_string().contains("expected extension: py"));
    }

    #[test]
    fn test_no_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Makefile");
        fs::write(&path, "all:\n").unwrap();

        assert!(validate_source(&path, &py()).is_err());
    }

    #[test]
    fn test_split_lines_strips_terminators() {
        assert_eq!(split_lines("a = 1\r\nb = 2\n\nc"), vec!["a = 1", "b = 2", "", "c"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_read_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("calc.py");
        fs::write(&path, "def f():\n    return 1\n").unwrap();

        assert_eq!(read_lines(&path).unwrap(), vec!["def f():", "    return 1"]);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("src/pkg/calc.py")), "calc.py");
    }
}

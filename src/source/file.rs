//! File-based telemetry source.
//!
//! Replays a JSON reading set from disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;
use twinwatch_types::ReadingSet;

use super::TelemetrySource;

/// A telemetry source that reads a reading set from a JSON file.
///
/// The file uses the camelCase form (`{"powerUsage": 82, ...}`). The source
/// tracks the file's modification time and only returns new data when the
/// file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being replayed.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file's modification time.
    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read and parse the file.
    fn read_file(&mut self) -> Option<ReadingSet> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(reading) => {
                    self.last_error = None;
                    Some(reading)
                }
                Err(e) => {
                    self.last_error = Some(format!("Parse error: {}", e));
                    None
                }
            },
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                None
            }
        }
    }
}

impl TelemetrySource for FileSource {
    fn read(&mut self) -> Option<ReadingSet> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // Never read successfully, always try
            (Some(_), None) => false, // File disappeared, keep the last reading
            (Some(last), Some(current)) => current > last,
        };

        if !file_changed {
            return None;
        }

        let reading = self.read_file()?;
        debug!(path = %self.path.display(), "replay file reloaded");
        self.last_modified = current_modified;
        Some(reading)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "powerUsage": 82,
            "temperature": 21,
            "humidity": 48,
            "airQuality": 77,
            "systemHealth": 93,
            "activeDevices": 97,
            "dataFlow": 164
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/reading.json");
        assert_eq!(source.path(), Path::new("/tmp/reading.json"));
        assert_eq!(source.description(), "file: /tmp/reading.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        let reading = source.read().unwrap();
        assert_eq!(reading.power_usage, 82);
        assert_eq!(reading.data_flow, 164);

        // Second read without file change returns None
        assert!(source.read().is_none());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/reading.json");

        assert!(source.read().is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.read().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }

    #[test]
    fn test_file_source_missing_field() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"powerUsage": 82}}"#).unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.read().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }
}

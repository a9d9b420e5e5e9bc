use crate::session::Session;
use std::path::Path;

pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file into the session and return a status line
    pub fn load_file(session: &mut Session, path: &Path) -> Result<String, String> {
        let summary = session
            .load_from_file(path)
            .map(|table| table.summary())
            .map_err(|e| e.to_string())?;
        Ok(format!(
            "Loaded {}: {}",
            path.file_name().unwrap_or_default().to_string_lossy(),
            summary
        ))
    }

    /// Download and load a CSV resource
    pub fn load_url(session: &mut Session, url: &str) -> Result<String, String> {
        if url.trim().is_empty() {
            return Err("Please enter a URL".to_string());
        }
        let summary = session
            .load_from_url(url)
            .map(|table| table.summary())
            .map_err(|e| e.to_string())?;
        Ok(format!("Loaded from URL: {}", summary))
    }
}

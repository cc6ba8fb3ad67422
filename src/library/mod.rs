mod loader;
mod scanner;
mod thumbnail;

use std::path::{Path, PathBuf};

pub use loader::{LoadedThumbnail, ThumbnailLoader};
pub use scanner::scan_dir;
pub use thumbnail::{extract_thumbnail, fit_within, ThumbnailImage};

/// A video found by the scanner
#[derive(Clone, Debug, PartialEq)]
pub struct VideoEntry {
    path: PathBuf,
    file_name: String,
}

impl VideoEntry {
    pub fn new(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, file_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name including its extension, as shown before formatting
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Scan `dir` and wrap every match in a `VideoEntry`
pub fn load_entries(dir: &Path, extensions: &[String]) -> Vec<VideoEntry> {
    scan_dir(dir, extensions)
        .into_iter()
        .map(VideoEntry::new)
        .collect()
}

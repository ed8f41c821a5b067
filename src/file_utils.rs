use crate::config::SUPPORTED_IMAGE_EXTENSIONS;
use crate::error::{AppError, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Returns true if the path has one of the supported image extensions.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_str.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Recursively collects every supported image below `dir`, sorted by path.
///
/// Unreadable entries below the root are skipped with a warning.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AppError::DirectoryNotFound(dir.to_path_buf()));
    }

    let start = std::time::Instant::now();
    let mut image_files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_supported_image(path) {
            image_files.push(path.to_path_buf());
        }
    }

    image_files.sort();
    debug!(
        "Scanned {} in {:?}: {} images",
        dir.display(),
        start.elapsed(),
        image_files.len()
    );
    Ok(image_files)
}

/// Scans the wallpaper directory, treating an empty result as an error.
pub fn list_wallpapers(dir: &Path) -> Result<Vec<PathBuf>> {
    let images = scan_directory(dir)?;
    if images.is_empty() {
        return Err(AppError::NoImages(dir.to_path_buf()));
    }
    Ok(images)
}

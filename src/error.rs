//! Unified error types for the wallpaper picker.

use std::fmt;
use std::path::PathBuf;

/// Application-specific errors.
#[derive(Debug)]
pub enum AppError {
    /// The wallpaper directory does not exist
    DirectoryNotFound(PathBuf),
    /// The wallpaper directory contains no supported images
    NoImages(PathBuf),
    /// Error walking the wallpaper directory
    DirectoryScan(String),
    /// Error loading or decoding an image file
    ImageLoad(String),
    /// The decode worker pool could not be started
    WorkerPool(String),
    /// An external wallpaper command failed to run or exited unsuccessfully
    WallpaperCommand(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DirectoryNotFound(path) => {
                write!(f, "Folder not found: {}", path.display())
            }
            AppError::NoImages(path) => write!(f, "No images in {}", path.display()),
            AppError::DirectoryScan(msg) => write!(f, "Directory scan error: {}", msg),
            AppError::ImageLoad(msg) => write!(f, "Image load error: {}", msg),
            AppError::WorkerPool(msg) => write!(f, "Worker pool error: {}", msg),
            AppError::WallpaperCommand(msg) => write!(f, "Wallpaper command error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::ImageLoad(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::ImageLoad(err.to_string())
    }
}

impl From<walkdir::Error> for AppError {
    fn from(err: walkdir::Error) -> Self {
        AppError::DirectoryScan(err.to_string())
    }
}

impl From<rayon::ThreadPoolBuildError> for AppError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        AppError::WorkerPool(err.to_string())
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;

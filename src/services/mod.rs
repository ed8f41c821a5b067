//! Service layer for work that leaves the UI thread or the process.
//!
//! Keeps decoding and external commands out of the UI handlers.

pub mod thumbnail_service;
pub mod wallpaper_service;

pub use thumbnail_service::{LoadEvent, ThumbnailLoader};
pub use wallpaper_service::WallpaperService;

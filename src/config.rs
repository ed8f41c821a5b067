//! Application configuration constants and startup configuration.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Supported image file extensions for scanning directories.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Environment variable overriding the wallpaper directory.
pub const WALL_DIR_ENV: &str = "WALL_DIR";

/// Wallpaper directory relative to the home directory when nothing else is given.
pub const DEFAULT_WALL_DIR: &str = "Pictures/.wallpapers";

/// Edge length of the square picker window, in logical pixels.
pub const WINDOW_SIZE: u32 = 900;

/// Inner hole radius as a fraction of the outer radius. 0 gives a full pie.
pub const INNER_HOLE_RATIO: f32 = 0.25;

/// Opacity of the dark disk behind the sectors.
pub const BACKGROUND_ALPHA: f32 = 0.55;

/// Maximum number of sectors (images) per page.
pub const PAGE_SIZE: usize = 6;

/// How long the pointer has to rest on one sector before the preview opens.
pub const HOVER_DELAY: Duration = Duration::from_millis(1500);

/// Number of decode workers.
pub const WORKER_COUNT: usize = 4;

/// Gap between the canvas edge and the preview image.
pub const PREVIEW_MARGIN: f32 = 50.0;

/// Edge length of the preview close button.
pub const CLOSE_BUTTON_SIZE: f32 = 40.0;

/// Horizontal click zone of the previous-page arrow, relative to the centre.
pub const PREV_ARROW_DX: (f32, f32) = (-90.0, -40.0);

/// Horizontal click zone of the next-page arrow, relative to the centre.
pub const NEXT_ARROW_DX: (f32, f32) = (30.0, 80.0);

/// Half height of both arrow click zones.
pub const ARROW_HALF_HEIGHT: f32 = 30.0;

/// External wallpaper daemon and its apply command.
#[derive(Debug, Clone)]
pub struct WallpaperConfig {
    pub daemon: String,
    pub daemon_args: Vec<String>,
    pub command: String,
    pub transition_type: String,
    pub transition_fps: u32,
    pub transition_duration: String,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            daemon: "swww-daemon".to_string(),
            daemon_args: vec!["--format".to_string(), "xrgb".to_string()],
            command: "swww".to_string(),
            transition_type: "any".to_string(),
            transition_fps: 60,
            transition_duration: "0.6".to_string(),
        }
    }
}

/// Configuration resolved once at startup.
#[derive(Debug, Clone)]
pub struct PickerConfig {
    pub wall_dir: PathBuf,
    pub window_size: u32,
    pub page_size: usize,
    pub hover_delay: Duration,
    pub worker_count: usize,
    pub wallpaper: WallpaperConfig,
}

impl PickerConfig {
    /// Builds the configuration from the command line and the environment.
    ///
    /// Exits the process for `--help`, `--version` and malformed arguments.
    pub fn from_env() -> Self {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self {
            wall_dir: resolve_wall_dir(cli.wall_dir, dirs::home_dir()),
            ..Self::default()
        }
    }

    /// Edge length thumbnails are cover-scaled to.
    pub fn thumbnail_edge(&self) -> u32 {
        self.window_size
    }

    /// Largest box the preview image has to fit into.
    pub fn preview_edge(&self) -> u32 {
        (self.window_size as f32 - 2.0 * PREVIEW_MARGIN).max(1.0) as u32
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            wall_dir: PathBuf::from(DEFAULT_WALL_DIR),
            window_size: WINDOW_SIZE,
            page_size: PAGE_SIZE,
            hover_delay: HOVER_DELAY,
            worker_count: WORKER_COUNT,
            wallpaper: WallpaperConfig::default(),
        }
    }
}

/// Command line of the picker.
#[derive(Debug, Parser)]
#[command(name = "wallpicker", version, about = "Radial wallpaper picker for swww")]
pub struct Cli {
    /// Wallpaper directory, searched recursively
    #[arg(value_name = "DIR", env = WALL_DIR_ENV)]
    pub wall_dir: Option<PathBuf>,
}

/// Picks the wallpaper directory: argument or environment, then home default.
fn resolve_wall_dir(dir: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = dir.filter(|dir| !dir.as_os_str().is_empty()) {
        return dir;
    }
    home.unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_WALL_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn positional_argument_is_the_directory() {
        let cli = Cli::try_parse_from(["wallpicker", "/data/walls"]).unwrap();
        assert_eq!(cli.wall_dir, Some(PathBuf::from("/data/walls")));

        let config = PickerConfig::from_cli(cli);
        assert_eq!(config.wall_dir, PathBuf::from("/data/walls"));
    }

    #[test]
    fn help_is_not_taken_as_directory() {
        let err = Cli::try_parse_from(["wallpicker", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let err = Cli::try_parse_from(["wallpicker", "--log-level", "debug"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn directory_reads_wall_dir_variable() {
        let command = <Cli as clap::CommandFactory>::command();
        let arg = command
            .get_positionals()
            .find(|arg| arg.get_id() == "wall_dir")
            .unwrap();
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new(WALL_DIR_ENV)));
    }

    #[test]
    fn missing_directory_falls_back_to_home() {
        let dir = resolve_wall_dir(None, Some(PathBuf::from("/home/me")));
        assert_eq!(dir, PathBuf::from("/home/me/Pictures/.wallpapers"));

        let empty = resolve_wall_dir(Some(PathBuf::new()), Some(PathBuf::from("/home/me")));
        assert_eq!(empty, PathBuf::from("/home/me/Pictures/.wallpapers"));
    }

    #[test]
    fn preview_edge_leaves_margin_on_both_sides() {
        let config = PickerConfig::default();
        assert_eq!(config.preview_edge(), 800);
        assert_eq!(config.thumbnail_edge(), 900);
    }
}

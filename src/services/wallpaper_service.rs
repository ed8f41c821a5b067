//! Service for applying a wallpaper through the external daemon.
//!
//! The daemon is located by exact process name and started when missing;
//! the apply command then runs to completion with fixed transition flags.

use crate::config::WallpaperConfig;
use crate::error::{AppError, Result};
use log::{error, info, warn};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

pub struct WallpaperService {
    config: WallpaperConfig,
}

impl WallpaperService {
    pub fn new(config: WallpaperConfig) -> Self {
        Self { config }
    }

    /// True if a process with exactly the daemon's name is running.
    pub fn daemon_running(&self) -> bool {
        Command::new("pgrep")
            .args(["-x", self.config.daemon.as_str()])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Starts the daemon in the background unless it is already running.
    pub fn ensure_daemon(&self) -> Result<()> {
        if self.daemon_running() {
            return Ok(());
        }

        info!("Starting {}", self.config.daemon);
        Command::new(&self.config.daemon)
            .args(&self.config.daemon_args)
            .spawn()
            .map_err(|e| {
                AppError::WallpaperCommand(format!("{}: {}", self.config.daemon, e))
            })?;
        Ok(())
    }

    /// Arguments passed to the apply command for `path`.
    pub fn apply_args(&self, path: &Path) -> Vec<OsString> {
        vec![
            "img".into(),
            path.as_os_str().to_os_string(),
            "--transition-type".into(),
            self.config.transition_type.clone().into(),
            "--transition-fps".into(),
            self.config.transition_fps.to_string().into(),
            "--transition-duration".into(),
            self.config.transition_duration.clone().into(),
        ]
    }

    /// Sets `path` as the desktop background and waits for the command.
    pub fn apply(&self, path: &Path) -> Result<()> {
        if let Err(e) = self.ensure_daemon() {
            warn!("{}", e);
        }

        let status = Command::new(&self.config.command)
            .args(self.apply_args(path))
            .status()
            .map_err(|e| AppError::WallpaperCommand(format!("{}: {}", self.config.command, e)))?;

        if !status.success() {
            let err = AppError::WallpaperCommand(format!(
                "{} exited with {}",
                self.config.command, status
            ));
            error!("{}", err);
            return Err(err);
        }

        info!("Set wallpaper: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_args_use_fixed_transition() {
        let service = WallpaperService::new(WallpaperConfig::default());
        let args = service.apply_args(Path::new("/walls/a b.png"));
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec![
                "img",
                "/walls/a b.png",
                "--transition-type",
                "any",
                "--transition-fps",
                "60",
                "--transition-duration",
                "0.6",
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_is_checked() {
        let config = WallpaperConfig {
            daemon: "true".to_string(),
            daemon_args: Vec::new(),
            command: "false".to_string(),
            ..WallpaperConfig::default()
        };
        let failing = WallpaperService::new(config.clone());
        assert!(matches!(
            failing.apply(Path::new("/walls/a.png")),
            Err(AppError::WallpaperCommand(_))
        ));

        let passing = WallpaperService::new(WallpaperConfig {
            command: "true".to_string(),
            ..config
        });
        assert!(passing.apply(Path::new("/walls/a.png")).is_ok());
    }

    #[test]
    fn missing_command_is_an_error() {
        let service = WallpaperService::new(WallpaperConfig {
            daemon: "wallpicker-test-no-such-daemon".to_string(),
            command: "wallpicker-test-no-such-command".to_string(),
            ..WallpaperConfig::default()
        });
        assert!(service.ensure_daemon().is_err());
        assert!(service.apply(Path::new("/walls/a.png")).is_err());
    }
}

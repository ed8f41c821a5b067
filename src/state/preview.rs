//! Full-canvas preview of one wallpaper before it is applied.

use crate::config::{CLOSE_BUTTON_SIZE, PREVIEW_MARGIN};
use crate::geometry::Rect;
use tiny_skia::Pixmap;
use std::path::{Path, PathBuf};

/// Where the preview image and its close button sit on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLayout {
    pub image: Rect,
    pub close_button: Rect,
    /// Canvas pixels per image pixel.
    pub scale: f32,
}

impl PreviewLayout {
    /// Fits an `image_width`x`image_height` image into the canvas minus the
    /// margin, centred, with the close button in its top-right corner.
    pub fn fit(canvas_width: f32, canvas_height: f32, image_width: u32, image_height: u32) -> Self {
        let available_w = (canvas_width - 2.0 * PREVIEW_MARGIN).max(1.0);
        let available_h = (canvas_height - 2.0 * PREVIEW_MARGIN).max(1.0);
        let scale = f32::min(
            available_w / image_width.max(1) as f32,
            available_h / image_height.max(1) as f32,
        );

        let width = image_width as f32 * scale;
        let height = image_height as f32 * scale;
        let image = Rect::new(
            (canvas_width - width) / 2.0,
            (canvas_height - height) / 2.0,
            width,
            height,
        );
        let close_button = Rect::new(
            image.right() - CLOSE_BUTTON_SIZE,
            image.y,
            CLOSE_BUTTON_SIZE,
            CLOSE_BUTTON_SIZE,
        );

        Self {
            image,
            close_button,
            scale,
        }
    }
}

pub struct PreviewState {
    path: PathBuf,
    image: Pixmap,
    layout: PreviewLayout,
}

impl PreviewState {
    pub fn new(path: PathBuf, image: Pixmap, canvas_width: f32, canvas_height: f32) -> Self {
        let layout = PreviewLayout::fit(canvas_width, canvas_height, image.width(), image.height());
        Self {
            path,
            image,
            layout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn image(&self) -> &Pixmap {
        &self.image
    }

    pub fn layout(&self) -> &PreviewLayout {
        &self.layout
    }

    pub fn close_button(&self) -> Rect {
        self.layout.close_button
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

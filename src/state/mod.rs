//! State management for the radial picker.
//!
//! `PickerState` is owned by the UI thread. Every input event is turned into
//! a list of [`Effect`]s which the UI layer carries out (timers, decode jobs,
//! redraws, the final wallpaper command), so the state itself stays free of
//! toolkit calls.

use crate::geometry::RadialLayout;
use crate::input::{self, ArrowAvailability, Hit, KeyCommand, NavArrow};
use tiny_skia::Pixmap;
use log::{debug, info, warn};
use std::path::PathBuf;

pub mod hover;
pub mod pagination;
pub mod preview;
pub mod thumbnails;

pub use hover::{HoverState, HoverTicket};
pub use pagination::{Direction, Paginator};
pub use preview::PreviewState;
pub use thumbnails::{Thumbnail, ThumbnailCache};

/// Side effect requested by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Redraw,
    /// Decode the thumbnails of a freshly shown page.
    LoadPage {
        generation: u64,
        paths: Vec<PathBuf>,
    },
    /// (Re)start the one-shot hover timer.
    ArmHoverTimer(HoverTicket),
    CancelHoverTimer,
    /// Decode the full preview image for a fired hover timer.
    LoadPreview {
        ticket: HoverTicket,
        path: PathBuf,
    },
    ApplyWallpaper(PathBuf),
    Quit,
}

pub type Effects = Vec<Effect>;

pub struct PickerState {
    images: Vec<PathBuf>,
    pages: Paginator,
    thumbnails: ThumbnailCache,
    hover: HoverState,
    preview: Option<PreviewState>,
    layout: RadialLayout,
    canvas_size: (f32, f32),
}

impl PickerState {
    /// Creates the state for a square canvas of `canvas_size` pixels.
    pub fn new(images: Vec<PathBuf>, page_size: usize, canvas_size: f32, inner_ratio: f32) -> Self {
        let pages = Paginator::new(images.len(), page_size);
        info!(
            "Page {} ({} images total)",
            pages.label(),
            images.len()
        );
        Self {
            images,
            pages,
            thumbnails: ThumbnailCache::new(),
            hover: HoverState::new(),
            preview: None,
            layout: RadialLayout::new(canvas_size, canvas_size, inner_ratio),
            canvas_size: (canvas_size, canvas_size),
        }
    }

    /// Kicks off loading of the first page.
    pub fn start(&mut self) -> Effects {
        self.load_current_page()
    }

    pub fn current_images(&self) -> &[PathBuf] {
        &self.images[self.pages.page_range()]
    }

    pub fn sector_count(&self) -> usize {
        self.current_images().len()
    }

    pub fn pages(&self) -> &Paginator {
        &self.pages
    }

    pub fn layout(&self) -> &RadialLayout {
        &self.layout
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        self.canvas_size
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        self.thumbnails.slots()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover.hovered()
    }

    pub fn preview(&self) -> Option<&PreviewState> {
        self.preview.as_ref()
    }

    /// Sectors still waiting for their thumbnail. Empty while the preview
    /// covers the ring.
    pub fn loading_sectors(&self) -> Vec<usize> {
        if self.preview.is_some() {
            return Vec::new();
        }
        self.thumbnails()
            .iter()
            .enumerate()
            .filter(|(_, thumbnail)| thumbnail.is_loading())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn arrows(&self) -> ArrowAvailability {
        ArrowAvailability {
            prev: self.pages.has_previous(),
            next: self.pages.has_next(),
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Effects {
        let sector = self.layout.sector_at(x, y, self.sector_count());
        self.hover_sector(sector)
    }

    pub fn pointer_left(&mut self) -> Effects {
        self.hover_sector(None)
    }

    fn hover_sector(&mut self, sector: Option<usize>) -> Effects {
        let had_timer = self.hover.is_pending();
        if !self.hover.set_hovered(sector) {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if had_timer {
            effects.push(Effect::CancelHoverTimer);
        }
        effects.push(Effect::Redraw);

        if let Some(sector) = sector {
            if self.preview.is_none() && sector < self.sector_count() {
                effects.push(Effect::ArmHoverTimer(self.hover.arm(sector)));
            }
        }
        effects
    }

    /// The hover timer identified by `ticket` fired.
    pub fn hover_elapsed(&mut self, ticket: HoverTicket) -> Effects {
        if self.preview.is_some() {
            self.hover.cancel();
            return Vec::new();
        }
        let Some(sector) = self.hover.fire(ticket) else {
            debug!("Ignoring stale hover timer {}", ticket);
            return Vec::new();
        };
        match self.current_images().get(sector) {
            Some(path) => vec![Effect::LoadPreview {
                ticket,
                path: path.clone(),
            }],
            None => Vec::new(),
        }
    }

    /// A preview decode finished. `image` is `None` when decoding failed.
    pub fn preview_loaded(
        &mut self,
        ticket: HoverTicket,
        path: PathBuf,
        image: Option<Pixmap>,
    ) -> Effects {
        let Some(sector) = self.hover.preview_ready(ticket) else {
            debug!("Dropping preview no longer hovered: {}", path.display());
            return Vec::new();
        };
        if self.preview.is_some() || self.current_images().get(sector) != Some(&path) {
            return Vec::new();
        }
        let Some(image) = image else {
            warn!("No preview available for {}", path.display());
            return Vec::new();
        };

        info!("Canvas preview: {}", path.display());
        let (width, height) = self.canvas_size;
        self.preview = Some(PreviewState::new(path, image, width, height));
        vec![Effect::Redraw]
    }

    /// A thumbnail decode finished. `image` is `None` when decoding failed.
    pub fn thumbnail_loaded(
        &mut self,
        generation: u64,
        index: usize,
        image: Option<Pixmap>,
    ) -> Effects {
        let Some(progress) = self.thumbnails.store(generation, index, image) else {
            debug!(
                "Dropping stale thumbnail {} of generation {}",
                index, generation
            );
            return Vec::new();
        };

        if progress.loaded % 3 == 0 || progress.is_complete() {
            info!("Loaded {}/{} images", progress.loaded, progress.total);
        }
        // Batch redraws while a page is streaming in
        if progress.loaded % 2 == 0 || progress.is_complete() {
            vec![Effect::Redraw]
        } else {
            Vec::new()
        }
    }

    /// Pointer button released at `(x, y)`.
    pub fn released(&mut self, x: f32, y: f32) -> Effects {
        if let Some(preview) = &self.preview {
            if preview.close_button().contains(x, y) {
                self.close_preview();
                info!("Preview closed via close button");
                return vec![Effect::Redraw];
            }
            return vec![
                Effect::ApplyWallpaper(preview.path().to_path_buf()),
                Effect::Quit,
            ];
        }

        match input::hit_test(&self.layout, x, y, self.sector_count(), self.arrows()) {
            Hit::Arrow(NavArrow::Prev) => self.turn_page(Direction::Previous),
            Hit::Arrow(NavArrow::Next) => self.turn_page(Direction::Next),
            Hit::Outside => vec![Effect::Quit],
            Hit::Sector(index) => match self.current_images().get(index) {
                Some(path) => vec![Effect::ApplyWallpaper(path.clone()), Effect::Quit],
                None => Vec::new(),
            },
        }
    }

    /// Returns `None` when the key is not handled in the current mode.
    pub fn key_pressed(&mut self, command: KeyCommand) -> Option<Effects> {
        match command {
            KeyCommand::Escape if self.preview.is_some() => {
                self.close_preview();
                info!("Preview closed via Escape");
                Some(vec![Effect::Redraw])
            }
            KeyCommand::Escape => Some(vec![Effect::Quit]),
            _ if self.preview.is_some() => None,
            KeyCommand::NextPage => Some(self.turn_page(Direction::Next)),
            KeyCommand::PrevPage => Some(self.turn_page(Direction::Previous)),
        }
    }

    fn close_preview(&mut self) {
        self.preview = None;
    }

    fn turn_page(&mut self, direction: Direction) -> Effects {
        if !self.pages.turn(direction) {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if self.hover.is_pending() {
            effects.push(Effect::CancelHoverTimer);
        }
        self.hover.reset();
        self.preview = None;
        info!("Page {}", self.pages.label());

        effects.extend(self.load_current_page());
        effects
    }

    fn load_current_page(&mut self) -> Effects {
        let paths = self.current_images().to_vec();
        let generation = self.thumbnails.reset(paths.len());
        info!("Loading {} images in background...", paths.len());
        vec![Effect::LoadPage { generation, paths }, Effect::Redraw]
    }
}

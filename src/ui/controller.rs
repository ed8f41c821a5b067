//! Owns the picker state on the UI thread and carries out its effects.
//!
//! Decode results come back through an mpsc channel. Workers post a
//! `loads-ready` wake-up with `slint::invoke_from_event_loop`, and the
//! controller drains the channel on the UI thread.

use crate::config::{INNER_HOLE_RATIO, PickerConfig};
use crate::error::Result;
use crate::input;
use crate::services::{LoadEvent, ThumbnailLoader, WallpaperService};
use crate::state::{Effect, Effects, PickerState};
use crate::ui::state_helpers;
use log::error;
use slint::{ComponentHandle, Timer, TimerMode};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

pub struct Controller {
    ui: slint::Weak<crate::AppWindow>,
    state: RefCell<PickerState>,
    hover_timer: Timer,
    loader: ThumbnailLoader,
    inbox: Receiver<LoadEvent>,
    wallpaper: WallpaperService,
    config: PickerConfig,
}

impl Controller {
    pub fn new(
        ui: &crate::AppWindow,
        images: Vec<PathBuf>,
        config: PickerConfig,
    ) -> Result<Rc<Self>> {
        let (sender, inbox) = mpsc::channel();
        let ui_handle = ui.as_weak();
        let loader = ThumbnailLoader::new(config.worker_count, sender, move || {
            let ui_handle = ui_handle.clone();
            let _ = slint::invoke_from_event_loop(move || {
                if let Some(ui) = ui_handle.upgrade() {
                    ui.global::<crate::Logic>().invoke_loads_ready();
                }
            });
        })?;

        let state = PickerState::new(
            images,
            config.page_size,
            config.window_size as f32,
            INNER_HOLE_RATIO,
        );
        state_helpers::set_canvas_size(ui, config.window_size as f32);

        Ok(Rc::new(Self {
            ui: ui.as_weak(),
            state: RefCell::new(state),
            hover_timer: Timer::default(),
            loader,
            inbox,
            wallpaper: WallpaperService::new(config.wallpaper.clone()),
            config,
        }))
    }

    /// Starts loading the first page.
    pub fn start(self: &Rc<Self>) {
        let effects = self.state.borrow_mut().start();
        self.dispatch(effects);
    }

    pub fn pointer_moved(self: &Rc<Self>, x: f32, y: f32) {
        let effects = self.state.borrow_mut().pointer_moved(x, y);
        self.dispatch(effects);
    }

    pub fn pointer_left(self: &Rc<Self>) {
        let effects = self.state.borrow_mut().pointer_left();
        self.dispatch(effects);
    }

    pub fn released(self: &Rc<Self>, x: f32, y: f32) {
        let effects = self.state.borrow_mut().released(x, y);
        self.dispatch(effects);
    }

    /// Returns whether the key was handled.
    pub fn key_pressed(self: &Rc<Self>, text: &str) -> bool {
        let Some(command) = input::key_command(text) else {
            return false;
        };
        let outcome = self.state.borrow_mut().key_pressed(command);
        match outcome {
            Some(effects) => {
                self.dispatch(effects);
                true
            }
            None => false,
        }
    }

    /// Applies every decode result queued since the last wake-up.
    pub fn drain_loads(self: &Rc<Self>) {
        let mut effects = Vec::new();
        {
            let mut state = self.state.borrow_mut();
            while let Ok(event) = self.inbox.try_recv() {
                effects.extend(match event {
                    LoadEvent::Thumbnail {
                        generation,
                        index,
                        image,
                    } => state.thumbnail_loaded(generation, index, image),
                    LoadEvent::Preview {
                        ticket,
                        path,
                        image,
                    } => state.preview_loaded(ticket, path, image),
                });
            }
        }

        // One redraw is enough for a whole batch
        let redraw = effects.contains(&Effect::Redraw);
        effects.retain(|effect| *effect != Effect::Redraw);
        if redraw {
            effects.push(Effect::Redraw);
        }
        self.dispatch(effects);
    }

    fn dispatch(self: &Rc<Self>, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::Redraw => self.refresh_view(),
                Effect::LoadPage { generation, paths } => {
                    self.loader
                        .load_page(generation, paths, self.config.thumbnail_edge());
                }
                Effect::ArmHoverTimer(ticket) => {
                    let controller = Rc::downgrade(self);
                    self.hover_timer.start(
                        TimerMode::SingleShot,
                        self.config.hover_delay,
                        move || {
                            if let Some(controller) = controller.upgrade() {
                                let effects = controller.state.borrow_mut().hover_elapsed(ticket);
                                controller.dispatch(effects);
                            }
                        },
                    );
                }
                Effect::CancelHoverTimer => self.hover_timer.stop(),
                Effect::LoadPreview { ticket, path } => {
                    self.loader
                        .load_preview(ticket, path, self.config.preview_edge());
                }
                Effect::ApplyWallpaper(path) => {
                    if let Err(e) = self.wallpaper.apply(&path) {
                        error!("Failed to set wallpaper {}: {}", path.display(), e);
                    }
                }
                Effect::Quit => {
                    self.hover_timer.stop();
                    if let Err(e) = slint::quit_event_loop() {
                        error!("Failed to quit event loop: {}", e);
                    }
                }
            }
        }
    }

    fn refresh_view(&self) {
        if let Some(ui) = self.ui.upgrade() {
            state_helpers::refresh_view(&ui, &self.state.borrow());
        }
    }
}

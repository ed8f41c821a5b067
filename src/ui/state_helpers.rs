//! Helper functions to set groups of ViewState properties at once.
//!
//! Instead of calling individual setters from the controller, these group
//! related properties (page indicator, preview labels, loading markers)
//! and build them from the picker state.

use crate::canvas::{self, Scene};
use crate::config::BACKGROUND_ALPHA;
use crate::image_loader;
use crate::state::PickerState;
use slint::ComponentHandle;

/// Sets the canvas size the window and frame are laid out with.
pub fn set_canvas_size(ui: &crate::AppWindow, size: f32) {
    ui.global::<crate::ViewState>().set_canvas_size(size);
}

/// Sets all page indicator properties at once.
///
/// Groups: show-page-label, page-label, can-prev, can-next
pub fn set_page_info(ui: &crate::AppWindow, state: &PickerState) {
    let view_state = ui.global::<crate::ViewState>();
    let pages = state.pages();
    let arrows = state.arrows();
    view_state.set_show_page_label(pages.page_count() > 1);
    view_state.set_page_label(pages.label().into());
    view_state.set_can_prev(arrows.prev);
    view_state.set_can_next(arrows.next);
}

/// Sets all preview label properties at once.
///
/// Groups: preview-active, preview-filename, preview-top, preview-bottom
pub fn set_preview_info(ui: &crate::AppWindow, state: &PickerState) {
    let view_state = ui.global::<crate::ViewState>();
    match state.preview() {
        Some(preview) => {
            let frame = preview.layout().image;
            view_state.set_preview_filename(preview.file_name().into());
            view_state.set_preview_top(frame.y);
            view_state.set_preview_bottom(frame.bottom());
            view_state.set_preview_active(true);
        }
        None => {
            view_state.set_preview_active(false);
            view_state.set_preview_filename("".into());
        }
    }
}

/// Places a "..." marker on every sector whose thumbnail is still loading.
pub fn set_loading_markers(ui: &crate::AppWindow, state: &PickerState) {
    let count = state.sector_count();
    let layout = state.layout();
    let markers: Vec<crate::LoadingMarker> = state
        .loading_sectors()
        .into_iter()
        .map(|index| {
            let (x, y) = layout.sector_midpoint(index, count);
            crate::LoadingMarker { x, y }
        })
        .collect();

    ui.global::<crate::ViewState>()
        .set_loading_markers(slint::ModelRc::new(slint::VecModel::from(markers)));
}

/// Renders the canvas and pushes it together with all text properties.
pub fn refresh_view(ui: &crate::AppWindow, state: &PickerState) {
    let start = std::time::Instant::now();
    // Pointer input stays in logical pixels; only the frame is device sized
    let scale = ui.window().scale_factor();
    match canvas::render(&Scene::from_state(state, BACKGROUND_ALPHA, scale)) {
        Some(frame) => {
            ui.global::<crate::ViewState>()
                .set_frame(image_loader::create_slint_image(&frame));
            log::trace!("Rendered {}x{} frame in {:?}", frame.width(), frame.height(), start.elapsed());
        }
        None => log::warn!("Could not allocate a frame at scale {}", scale),
    }

    set_page_info(ui, state);
    set_preview_info(ui, state);
    set_loading_markers(ui, state);
}

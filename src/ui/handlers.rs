//! Event handlers for UI callbacks.
//!
//! Sets up all Logic callbacks (pointer motion, release, keys, load
//! wake-ups) and forwards them to the controller on the UI thread.

use crate::ui::Controller;
use slint::ComponentHandle;
use std::rc::Rc;

/// Sets up all UI event handlers for the application.
///
/// Each callback holds its own handle to the controller; the controller only
/// keeps a weak handle to the window, so there is no reference cycle.
pub fn setup_handlers(ui: &crate::AppWindow, controller: Rc<Controller>) {
    let logic = ui.global::<crate::Logic>();

    logic.on_pointer_moved({
        let controller = controller.clone();
        move |x, y| controller.pointer_moved(x, y)
    });

    logic.on_pointer_left({
        let controller = controller.clone();
        move || controller.pointer_left()
    });

    logic.on_released({
        let controller = controller.clone();
        move |x, y| controller.released(x, y)
    });

    logic.on_key_pressed({
        let controller = controller.clone();
        move |text| controller.key_pressed(text.as_str())
    });

    // Posted from decode workers via invoke_from_event_loop
    logic.on_loads_ready(move || controller.drain_loads());
}

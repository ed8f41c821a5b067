slint::include_modules!();

mod canvas;
mod config;
mod error;
mod file_utils;
mod geometry;
mod image_loader;
mod input;
mod services;
mod state;
mod ui;

fn init_logging() {
    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_module("wallpicker", log::LevelFilter::Debug)
        .init();

    #[cfg(not(debug_assertions))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("wallpicker=info"))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = config::PickerConfig::from_env();
    let images = match file_utils::list_wallpapers(&config.wall_dir) {
        Ok(images) => images,
        Err(e) => {
            eprintln!("[wallpicker] {}", e);
            std::process::exit(1);
        }
    };

    let app = AppWindow::new()?;
    let controller = ui::Controller::new(&app, images, config)?;

    // Setup all UI event handlers
    ui::setup_handlers(&app, controller.clone());
    controller.start();

    app.run()?;

    Ok(())
}

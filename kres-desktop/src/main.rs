// Disable the console window that pops up when you launch the .exe
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
mod icon;
#[cfg(target_os = "windows")]
mod tray;
#[cfg(target_os = "windows")]
mod win32;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run()
}

#[cfg(target_os = "windows")]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = win32::config_path()?;
    log::info!("Using config {}", config_path.display());

    let app = kres::App::startup(config_path, win32::GdiDisplay);
    tray::run(app)
}

#[cfg(not(target_os = "windows"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    log::error!("Resolution switching is only supported on Windows");
    Ok(())
}

use bevy::{prelude::*, window::WindowResized};

pub struct DisplayPlugin;

impl Plugin for DisplayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, log_resize_system);
    }
}

/// Camera aspect, surface size and pixel density all follow the window on their own.
/// The render resolution is the window's native physical size, nothing overrides it.
fn log_resize_system(mut resized: EventReader<WindowResized>, windows: Query<&Window>) {
    for ev in resized.read() {
        let Ok(window) = windows.get(ev.window) else {
            continue;
        };
        debug!(
            "Window resized to {}x{} ({}x{} physical, scale {})",
            ev.width,
            ev.height,
            window.physical_width(),
            window.physical_height(),
            window.scale_factor()
        );
    }
}

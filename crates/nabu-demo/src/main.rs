//! Parent and child window sharing one event loop.
//!
//! ESC closes whichever window has focus; closing the parent ends the demo.
//! The pointer position over the parent tints the child. Pass `--verbose`
//! for debug logging from the window layer.

use anyhow::{Context, Result};

use nabu_window::input::Key;
use nabu_window::logging::{init_logging, LoggingConfig};
use nabu_window::platform::winit::{WinitConfig, WinitPlatform};
use nabu_window::{SurfaceWindow, WindowConfig};

const SIZE: u32 = 600;

fn main() -> Result<()> {
    let logging = if std::env::args().any(|a| a == "--verbose") {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    init_logging(logging);

    let platform = WinitPlatform::new(WinitConfig::default()).context("no display available")?;

    let parent_config = WindowConfig::new(SIZE, SIZE).with_name("parent");
    let mut parent = SurfaceWindow::create(&platform, &parent_config)
        .context("failed to create parent window")?;

    let child_config = WindowConfig::new(SIZE, SIZE)
        .with_name("child")
        .with_parent(parent.native_window());
    let mut child = SurfaceWindow::create(&platform, &child_config)
        .context("failed to create child window")?;

    log::info!("parent:\n{parent}");
    log::info!("child:\n{child}");

    let (mut x, mut y) = (0.0_f64, 0.0_f64);

    while parent.is_active() {
        if child.pump_input() && child.input().keyboard.key_down(Key::Escape)? {
            child.request_close();
        }

        if parent.pump_input() {
            if parent.input().keyboard.key_down(Key::Escape)? {
                parent.request_close();
            }
            let mouse = &parent.input().mouse;
            x = -(1.0 - f64::from(mouse.x) / f64::from(parent.width().max(1)) * 2.0);
            y = 1.0 - f64::from(mouse.y) / f64::from(parent.height().max(1)) * 2.0;
        }

        let handle = child.native_window();
        if let Some(display) = child.display_mut() {
            display.set_clear_color(handle, tint(x, y));
        }
        child.focus();
        child.swap_buffers();

        let handle = parent.native_window();
        if let Some(display) = parent.display_mut() {
            display.set_clear_color(handle, wgpu::Color { r: 0.3, g: 0.0, b: 0.0, a: 1.0 });
        }
        parent.focus();
        parent.swap_buffers();
    }

    child.close();
    log::info!("parent closed; exiting");
    Ok(())
}

/// Maps a pointer position in [-1, 1]² to a green-dominant color.
fn tint(x: f64, y: f64) -> wgpu::Color {
    wgpu::Color {
        r: (x + 1.0) / 2.0 * 0.5,
        g: 1.0,
        b: (y + 1.0) / 2.0 * 0.5,
        a: 1.0,
    }
}

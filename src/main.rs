//! Demo binary: swings a caption across the chosen display for a few
//! seconds, changes the style halfway through, then shuts down.
//!
//! Usage: `textveil [display-index]`

fn main() {
    env_logger::init();

    #[cfg(target_os = "windows")]
    {
        if let Err(err) = run() {
            eprintln!("textveil error: {err}");
            std::process::exit(1);
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        eprintln!("textveil currently supports Windows only.");
        std::process::exit(1);
    }
}

#[cfg(target_os = "windows")]
fn run() -> textveil::OverlayResult<()> {
    use std::time::{Duration, Instant};

    use textveil::platform::windows::storage::config;
    use textveil::TextOverlay;

    let display_index: usize = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0);

    let defaults = config::load_defaults();

    let mut overlay = TextOverlay::new();
    overlay.start("textveil demo", display_index)?;
    overlay.update_style(defaults.font_size, defaults.font_weight.value());
    overlay.update_color(
        defaults.color.r,
        defaults.color.g,
        defaults.color.b,
        defaults.color.a,
    );

    // Swing the caption around the display, restyle after five seconds.
    let started = Instant::now();
    let mut angle = 0.0f32;
    let mut restyled = false;
    while started.elapsed() < Duration::from_secs(10) {
        angle += 0.1;
        let x = 500.0 + angle.sin() * 200.0;
        let y = 300.0 + angle.cos() * 100.0;
        overlay.update_all(x, y, &format!("position: ({x:.1}, {y:.1})"));

        if !restyled && started.elapsed() >= Duration::from_secs(5) {
            overlay.update_style(24.0, 400);
            // Make the restyle the default for the next run.
            config::save_defaults(&config::OverlayDefaults {
                font_size: 24.0,
                font_weight: textveil::FontWeight::from_value(400),
                ..defaults
            });
            restyled = true;
        }

        std::thread::sleep(Duration::from_millis(16));
    }

    overlay.stop();
    config::flush_config();
    Ok(())
}

//! r2 - spinning cube in the terminal
//!
//! Exercises the whole transform chain (quaternions, look-at, perspective)
//! and draws the result with ANSI escape sequences.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use r2::config::AppConfig;
use r2::viewer::Viewer;
use r2_term::escape;

fn run(config: &AppConfig) -> io::Result<()> {
    let mut viewer = Viewer::new(config);
    let delay = Duration::from_millis(config.viewer.frame_delay_ms);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}{}", escape::HIDE_CURSOR, escape::ERASE_SCREEN)?;

    for frame in 0..viewer.frame_count() {
        viewer.render_frame(frame);
        out.write_all(viewer.compose().as_bytes())?;
        out.flush()?;
        thread::sleep(delay);
    }

    let below = config.viewer.rows.saturating_add(2);
    writeln!(
        out,
        "{}{}{}",
        escape::cursor_pos(below, 1),
        escape::RESET,
        escape::SHOW_CURSOR
    )?;
    out.flush()
}

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting r2 viewer");

    if let Err(e) = run(&config) {
        // Leave the terminal usable even when output failed midway
        print!("{}{}", escape::RESET, escape::SHOW_CURSOR);
        log::error!("Viewer stopped: {}", e);
        std::process::exit(1);
    }
}

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

static SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn new_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);
    pb.set_style(style);
    pb
}

fn current() -> Option<ProgressBar> {
    SPINNER.lock().ok().and_then(|slot| slot.clone())
}

/// Shows a spinner with `msg` while an external call is in flight.
pub fn start(msg: impl Into<String>) {
    let pb = new_spinner();
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));

    if let Ok(mut slot) = SPINNER.lock() {
        if let Some(old) = slot.replace(pb) {
            old.finish_and_clear();
        }
    }
}

pub fn stop() {
    let taken = SPINNER.lock().ok().and_then(|mut slot| slot.take());
    if let Some(pb) = taken {
        pb.finish_and_clear();
    }
}

/// Runs `f` with the spinner hidden, if one is showing.
pub fn suspend<F: FnOnce() -> R, R>(f: F) -> R {
    match current() {
        Some(pb) => pb.suspend(f),
        None => f(),
    }
}

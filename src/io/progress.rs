//! Stage progress bars for cache construction and mosaic assembly

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>16}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display for the stages of one mosaic run
///
/// Each stage gets its own bar; finished bars stay visible until
/// [`ProgressManager::finish`] clears the display.
pub struct ProgressManager {
    multi_progress: MultiProgress,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
        }
    }

    /// Create a progress manager that never draws
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(
                indicatif::ProgressDrawTarget::hidden(),
            ),
        }
    }

    /// Add a bar for a stage with `len` steps
    pub fn stage(&self, label: &str, len: usize) -> ProgressBar {
        let bar = self.multi_progress.add(ProgressBar::new(len as u64));
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(label.to_string());
        bar
    }

    /// Run `f` with every bar hidden, redrawing them afterwards
    ///
    /// Log lines written to stderr inside `f` land above the bars instead of
    /// through them.
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        self.multi_progress.suspend(f)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}

/// Run `f` with an optional manager's bars hidden
pub fn suspended<R>(progress: Option<&ProgressManager>, f: impl FnOnce() -> R) -> R {
    match progress {
        Some(pm) => pm.suspend(f),
        None => f(),
    }
}

/// Advance an optional stage bar by one step
pub fn advance(bar: Option<&ProgressBar>) {
    if let Some(bar) = bar {
        bar.inc(1);
    }
}

/// Mark an optional stage bar as complete with a summary message
pub fn complete(bar: Option<&ProgressBar>, message: String) {
    if let Some(bar) = bar {
        bar.finish_with_message(message);
    }
}

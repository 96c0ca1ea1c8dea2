use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::borrow::Cow;
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;

/// A single-line stderr spinner for the phases of a command.
///
/// A spinner dropped before [`Spinner::finish`] clears itself, so error paths do
/// not leave a half-drawn line behind.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self::with_target(ProgressDrawTarget::stderr(), message)
    }

    fn with_target(target: ProgressDrawTarget, message: impl Into<Cow<'static, str>>) -> Self {
        let pb = ProgressBar::new_spinner()
            .with_style(Self::spinner_style())
            .with_message(message);
        pb.set_draw_target(target);
        pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        Self { pb }
    }

    pub fn set_message(&self, message: impl Into<Cow<'static, str>>) {
        self.pb.set_message(message);
    }

    pub fn finish(&self, message: impl Into<Cow<'static, str>>) {
        self.pb.disable_steady_tick();
        self.pb.finish_with_message(message);
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

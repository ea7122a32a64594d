// src/progress.rs
/// Lightweight progress reporting for a fetch (connect → download → parse).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called when the request is about to be sent.
    fn begin(&mut self, _url: &str) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self, _ok: bool) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects every message; handy when a caller wants the trail afterwards.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub lines: Vec<String>,
    pub finished: Option<bool>,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, url: &str) {
        self.lines.push(format!("begin {url}"));
    }
    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }
    fn finish(&mut self, ok: bool) {
        self.finished = Some(ok);
    }
}

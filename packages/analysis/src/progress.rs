use crate::types::FileReport;

/// A structured progress event emitted while an analysis run advances
#[derive(Debug)]
pub enum ProgressEvent<'a> {
    FileStarted {
        path: &'a str,
    },

    ComponentResolved {
        path: &'a str,
        name: &'a str,
    },

    DeclarationSkipped {
        path: &'a str,
        name: &'a str,
    },

    FileAnalyzed {
        path: &'a str,
        report: &'a FileReport,
    },

    FileFailed {
        path: &'a str,
        message: &'a str,
    },
}

/// Callback interface for observing analysis progress
///
/// The engine performs no output of its own; drivers plug a reporter in
/// here and render events however they like.
pub trait Progress {
    fn on_event(&mut self, event: ProgressEvent<'_>);
}

/// Reporter that ignores all events
#[derive(Debug, Default)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn on_event(&mut self, _event: ProgressEvent<'_>) {}
}

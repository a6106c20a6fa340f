//! Progress reporting for build stages
//!
//! The pipeline and every stage receive a `&dyn Progress` and report
//! `(stage, ratio, message)` updates through it. Absence of a listener is
//! expressed with `NoProgress` rather than an `Option` threaded through
//! the call tree.

/// Receives fractional progress updates during a build.
///
/// `ratio` is in `[0.0, 1.0]` and non-decreasing within a single reporter.
pub trait Progress: Send + Sync {
    fn report(&self, stage: &str, ratio: f64, message: &str);
}

/// A progress sink that discards every update
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&self, _stage: &str, _ratio: f64, _message: &str) {}
}

impl<F> Progress for F
where
    F: Fn(&str, f64, &str) + Send + Sync,
{
    fn report(&self, stage: &str, ratio: f64, message: &str) {
        self(stage, ratio, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_is_a_progress_sink() {
        let events: Mutex<Vec<(String, f64, String)>> = Mutex::new(Vec::new());
        let sink = |stage: &str, ratio: f64, message: &str| {
            events
                .lock()
                .unwrap()
                .push((stage.to_string(), ratio, message.to_string()));
        };

        let progress: &dyn Progress = &sink;
        progress.report("collect", 0.5, "halfway");

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, "collect");
        assert_eq!(recorded[0].1, 0.5);
    }

    #[test]
    fn test_no_progress_accepts_updates() {
        let progress: &dyn Progress = &NoProgress;
        progress.report("archive", 1.0, "done");
    }
}

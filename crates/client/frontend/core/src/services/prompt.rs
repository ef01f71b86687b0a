//! Prompt presentation over an external [`PromptSink`].

use std::sync::Arc;

use interaction_core::PromptSink;
use tracing::trace;

use super::targeting::{AvailableInteraction, TargetTracker};

/// Forwards only prompt transitions to the sink.
///
/// The sink sees `show_prompt` when the prompt appears or its text changes
/// and a single `hide_prompt` when it goes away. Nothing is sent while the
/// displayed primary interaction stays the same.
#[derive(Debug)]
pub struct PromptPresenter<S> {
    sink: S,
    shown: Option<Arc<str>>,
}

impl<S: PromptSink> PromptPresenter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, shown: None }
    }

    /// Presents the tracker's primary interaction.
    ///
    /// Trackers that do not drive the prompt (server parity, foreign
    /// controller) leave it hidden.
    pub fn sync(&mut self, tracker: &TargetTracker) {
        let primary = if tracker.drives_prompt() {
            tracker.primary()
        } else {
            None
        };
        self.present(primary);
    }

    pub fn present(&mut self, primary: Option<&AvailableInteraction>) {
        match (primary, &self.shown) {
            (None, None) => {}
            (None, Some(_)) => {
                trace!(target: "frontend::prompt", "hide");
                self.sink.hide_prompt();
                self.shown = None;
            }
            (Some(primary), Some(shown)) if *shown == primary.name => {}
            (Some(primary), _) => {
                trace!(target: "frontend::prompt", text = %primary.name, "show");
                self.sink.show_prompt(&primary.name);
                self.shown = Some(Arc::clone(&primary.name));
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.shown.is_some()
    }

    /// Text currently on screen, if any.
    pub fn text(&self) -> Option<&str> {
        self.shown.as_deref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interaction_core::InteractionId;

    #[derive(Debug, Default)]
    struct Recorder(Vec<String>);

    impl PromptSink for Recorder {
        fn show_prompt(&mut self, text: &str) {
            self.0.push(format!("show {text}"));
        }

        fn hide_prompt(&mut self) {
            self.0.push("hide".to_string());
        }
    }

    fn entry(id: u32, name: &str) -> AvailableInteraction {
        AvailableInteraction {
            id: InteractionId(id),
            name: Arc::from(name),
        }
    }

    #[test]
    fn only_transitions_reach_the_sink() {
        let mut presenter = PromptPresenter::new(Recorder::default());
        let open = entry(0, "Open");
        let close = entry(1, "Close");

        presenter.present(None);
        presenter.present(Some(&open));
        presenter.present(Some(&open));
        presenter.present(Some(&close));
        assert_eq!(presenter.text(), Some("Close"));
        presenter.present(None);
        presenter.present(None);

        assert!(!presenter.is_visible());
        assert_eq!(
            presenter.into_sink().0,
            ["show Open", "show Close", "hide"]
        );
    }
}

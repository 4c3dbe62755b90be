//! Playback state machine for one mounted lesson view
//!
//! `Fresh -> Failed` is one-way for a given URL. Loading a different URL
//! discards the old state and starts again from `Fresh`.

use tracing::{debug, warn};

use super::provider::VideoSource;
use super::resolver::RenderDecision;

/// Diagnostic notes are cut to this many characters
const MAX_NOTE_CHARS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Native playback not tried yet, or still running
    #[default]
    Fresh,
    /// Native playback failed, use the fallback embed
    Failed,
}

/// Per-view playback record. Owned by exactly one view, never persisted.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    source: VideoSource,
    title: String,
    state: PlaybackState,
}

impl PlaybackSession {
    pub fn new(url: &str, title: &str) -> Self {
        Self {
            source: VideoSource::parse(url),
            title: title.to_string(),
            state: PlaybackState::Fresh,
        }
    }

    /// Point the view at a lesson. Returns true when the URL changed and the
    /// view was remounted.
    pub fn load(&mut self, url: &str, title: &str) -> bool {
        self.title = title.to_string();
        if self.source.raw_url == url {
            return false;
        }

        debug!(url, "Lesson video changed, resetting playback state");
        *self = Self::new(url, title);
        true
    }

    pub fn url(&self) -> &str {
        &self.source.raw_url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> &VideoSource {
        &self.source
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn decision(&self) -> RenderDecision {
        self.source.render(self.state)
    }

    /// Native media error signal. Only a short description is kept.
    ///
    /// Returns true when the view has to re-render onto the fallback embed.
    pub fn report_native_error(&mut self, description: &str) -> bool {
        if self.state == PlaybackState::Failed || !self.decision().is_native() {
            debug!(url = self.url(), "Ignoring playback error outside native playback");
            return false;
        }

        let note = diagnostic_note(description);
        warn!(
            url = self.url(),
            provider = self.source.provider.name(),
            note = %note,
            "Native playback failed, switching to fallback embed"
        );
        self.state = PlaybackState::Failed;
        true
    }
}

/// Short log-safe form of a player error description
fn diagnostic_note(description: &str) -> String {
    description.chars().take(MAX_NOTE_CHARS).collect()
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new("", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRIVE: &str = "https://drive.google.com/file/d/ABC123/view?usp=drive_link";

    #[test]
    fn test_new_session_is_fresh() {
        let session = PlaybackSession::new(DRIVE, "Full Body");
        assert_eq!(session.state(), PlaybackState::Fresh);
        assert_eq!(session.title(), "Full Body");
        assert_eq!(
            session.decision(),
            RenderDecision::Native {
                src: "https://drive.google.com/uc?export=download&id=ABC123".to_string()
            }
        );
    }

    #[test]
    fn test_native_error_switches_to_preview() {
        let mut session = PlaybackSession::new(DRIVE, "Full Body");
        assert!(session.report_native_error("MEDIA_ERR_SRC_NOT_SUPPORTED"));
        assert_eq!(session.state(), PlaybackState::Failed);
        assert_eq!(
            session.decision(),
            RenderDecision::Embed {
                src: "https://drive.google.com/file/d/ABC123/preview".to_string()
            }
        );
    }

    #[test]
    fn test_error_transition_happens_once() {
        let mut session = PlaybackSession::new(DRIVE, "Full Body");
        assert!(session.report_native_error("first"));
        assert!(!session.report_native_error("second"));
        assert_eq!(session.state(), PlaybackState::Failed);
    }

    #[test]
    fn test_error_ignored_for_embed_sources() {
        let mut session = PlaybackSession::new("https://youtu.be/dQw4w9WgXcQ", "Aula");
        assert!(!session.report_native_error("stray"));
        assert_eq!(session.state(), PlaybackState::Fresh);

        let mut empty = PlaybackSession::default();
        assert!(!empty.report_native_error("stray"));
        assert_eq!(empty.decision(), RenderDecision::Placeholder);
    }

    #[test]
    fn test_url_change_resets_failure() {
        let mut session = PlaybackSession::new(DRIVE, "Dia 1");
        session.report_native_error("boom");

        let other = "https://drive.google.com/file/d/XYZ789/view";
        assert!(session.load(other, "Dia 2"));
        assert_eq!(session.state(), PlaybackState::Fresh);
        assert!(session.decision().is_native());
    }

    #[test]
    fn test_same_url_keeps_failure() {
        let mut session = PlaybackSession::new(DRIVE, "Dia 1");
        session.report_native_error("boom");
        assert!(!session.load(DRIVE, "Dia 1 (renomeado)"));
        assert_eq!(session.state(), PlaybackState::Failed);
        assert_eq!(session.title(), "Dia 1 (renomeado)");
    }

    #[test]
    fn test_return_to_failed_url_retries_native() {
        let other = "https://cdn.example.com/aula.webm";
        let mut session = PlaybackSession::new(DRIVE, "Dia 1");
        session.report_native_error("boom");
        session.load(other, "Dia 2");
        session.load(DRIVE, "Dia 1");
        assert_eq!(session.state(), PlaybackState::Fresh);
    }

    #[test]
    fn test_long_error_description_accepted() {
        let mut session = PlaybackSession::new("https://cdn.example.com/a.mp4", "Aula");
        let long = "x".repeat(10_000);
        assert!(session.report_native_error(&long));
    }

    #[test]
    fn test_diagnostic_note_truncated() {
        assert_eq!(diagnostic_note(&"x".repeat(10_000)).chars().count(), MAX_NOTE_CHARS);
        assert_eq!(diagnostic_note("MEDIA_ERR_DECODE"), "MEDIA_ERR_DECODE");
        // counts characters, not bytes
        let accented = "é".repeat(200);
        assert_eq!(diagnostic_note(&accented).chars().count(), MAX_NOTE_CHARS);
    }
}

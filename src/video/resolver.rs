//! Rendering decisions - which surface shows a lesson video and from which URL

use super::playback::PlaybackState;
use super::provider::{ProviderKind, VideoSource};

/// What the lesson view should put on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDecision {
    /// No video configured for the lesson
    Placeholder,
    /// Third-party viewer frame pointed at an embed/preview endpoint
    Embed { src: String },
    /// Direct media element pointed at a streamable file URL
    Native { src: String },
}

impl RenderDecision {
    pub fn src(&self) -> Option<&str> {
        match self {
            RenderDecision::Placeholder => None,
            RenderDecision::Embed { src } | RenderDecision::Native { src } => Some(src),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, RenderDecision::Native { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            RenderDecision::Placeholder => "sem vídeo",
            RenderDecision::Embed { .. } => "embed",
            RenderDecision::Native { .. } => "nativo",
        }
    }
}

pub fn youtube_embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", id)
}

pub fn drive_stream_url(id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={}", id)
}

pub fn drive_preview_url(id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/preview", id)
}

/// Player URL for a numeric Vimeo link; anything already on the player host passes through
pub fn vimeo_embed_url(raw_url: &str, id: Option<&str>) -> String {
    match id {
        Some(id) if !raw_url.contains("player.vimeo.com") => {
            format!("https://player.vimeo.com/video/{}", id)
        }
        _ => raw_url.to_string(),
    }
}

/// SharePoint/OneDrive viewer links become embed links
pub fn onedrive_embed_url(raw_url: &str) -> String {
    if raw_url.contains("/v/") {
        raw_url.replacen("/v/", "/embed/", 1)
    } else {
        raw_url.to_string()
    }
}

impl VideoSource {
    /// Whether this source is tried through a direct media element first
    pub fn prefers_native(&self) -> bool {
        matches!(self.provider, ProviderKind::GoogleDrive | ProviderKind::DirectFile)
    }

    /// URL handed to the native player
    pub fn stream_url(&self) -> String {
        match (self.provider, self.primary_id.as_deref()) {
            (ProviderKind::GoogleDrive, Some(id)) => drive_stream_url(id),
            _ => self.raw_url.clone(),
        }
    }

    /// URL handed to the viewer frame
    pub fn embed_url(&self) -> String {
        let id = self.primary_id.as_deref();
        match (self.provider, id) {
            (ProviderKind::YouTube, Some(id)) => youtube_embed_url(id),
            (ProviderKind::Vimeo, _) => vimeo_embed_url(&self.raw_url, id),
            (ProviderKind::GoogleDrive, Some(id)) => drive_preview_url(id),
            (ProviderKind::OneDrive, _) => onedrive_embed_url(&self.raw_url),
            _ => self.raw_url.clone(),
        }
    }

    /// Pure: same source and state always give the same decision
    pub fn render(&self, state: PlaybackState) -> RenderDecision {
        if self.is_empty() {
            return RenderDecision::Placeholder;
        }

        if self.prefers_native() && state == PlaybackState::Fresh {
            RenderDecision::Native {
                src: self.stream_url(),
            }
        } else {
            RenderDecision::Embed {
                src: self.embed_url(),
            }
        }
    }
}

pub fn resolve(raw_url: &str, state: PlaybackState) -> RenderDecision {
    VideoSource::parse(raw_url).render(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::provider::classify;

    const DRIVE: &str = "https://drive.google.com/file/d/ABC123/view?usp=drive_link";

    fn embed(src: &str) -> RenderDecision {
        RenderDecision::Embed { src: src.to_string() }
    }

    fn native(src: &str) -> RenderDecision {
        RenderDecision::Native { src: src.to_string() }
    }

    #[test]
    fn test_empty_is_placeholder() {
        assert_eq!(resolve("", PlaybackState::Fresh), RenderDecision::Placeholder);
        assert_eq!(resolve("", PlaybackState::Failed), RenderDecision::Placeholder);
    }

    #[test]
    fn test_youtube_ignores_state() {
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10";
        let expected = embed("https://www.youtube.com/embed/dQw4w9WgXcQ");
        assert_eq!(resolve(url, PlaybackState::Fresh), expected);
        assert_eq!(resolve(url, PlaybackState::Failed), expected);
    }

    #[test]
    fn test_vimeo_page_to_player() {
        assert_eq!(
            resolve("https://vimeo.com/123456789", PlaybackState::Fresh),
            embed("https://player.vimeo.com/video/123456789")
        );
    }

    #[test]
    fn test_vimeo_player_passthrough() {
        let url = "https://player.vimeo.com/video/123456789?h=abc";
        assert_eq!(resolve(url, PlaybackState::Fresh), embed(url));
        // no numeric id after vimeo.com/
        let channel = "https://vimeo.com/channels/staffpicks";
        assert_eq!(resolve(channel, PlaybackState::Fresh), embed(channel));
    }

    #[test]
    fn test_drive_native_then_preview() {
        assert_eq!(
            resolve(DRIVE, PlaybackState::Fresh),
            native("https://drive.google.com/uc?export=download&id=ABC123")
        );
        assert_eq!(
            resolve(DRIVE, PlaybackState::Failed),
            embed("https://drive.google.com/file/d/ABC123/preview")
        );
    }

    #[test]
    fn test_direct_file_native_then_raw_embed() {
        let url = "https://cdn.example.com/aula.mp4?sig=1";
        assert_eq!(resolve(url, PlaybackState::Fresh), native(url));
        assert_eq!(resolve(url, PlaybackState::Failed), embed(url));
    }

    #[test]
    fn test_onedrive_viewer_rewritten() {
        assert_eq!(
            resolve("https://1drv.ms/v/s!AbCdEf", PlaybackState::Fresh),
            embed("https://1drv.ms/embed/s!AbCdEf")
        );
        let url = "https://contoso.sharepoint.com/:v:/g/video";
        assert_eq!(resolve(url, PlaybackState::Fresh), embed(url));
    }

    #[test]
    fn test_onedrive_beats_drive_and_direct_file() {
        let sharepoint = "https://contoso.sharepoint.com/d/abc/video.mp4";
        assert_eq!(classify(sharepoint), ProviderKind::OneDrive);
        assert_eq!(resolve(sharepoint, PlaybackState::Fresh), embed(sharepoint));

        let clip = "https://1drv.ms/v/clip.mp4";
        assert_eq!(classify(clip), ProviderKind::OneDrive);
        assert_eq!(
            resolve(clip, PlaybackState::Fresh),
            embed("https://1drv.ms/embed/clip.mp4")
        );
    }

    #[test]
    fn test_vimeo_beats_drive() {
        let url = "https://vimeo.com/123/d/xyz/";
        assert_eq!(classify(url), ProviderKind::Vimeo);
        assert_eq!(
            resolve(url, PlaybackState::Fresh),
            embed("https://player.vimeo.com/video/123")
        );
    }

    #[test]
    fn test_drive_with_youtube_sized_v_param_embeds_youtube() {
        let url = "https://drive.google.com/file/d/ABC/view?v=dQw4w9WgXcQ";
        assert_eq!(
            resolve(url, PlaybackState::Fresh),
            embed("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_unknown_passthrough() {
        assert_eq!(resolve("not a url", PlaybackState::Fresh), embed("not a url"));
        assert_eq!(resolve("not a url", PlaybackState::Failed), embed("not a url"));
    }

    #[test]
    fn test_resolve_idempotent() {
        for state in [PlaybackState::Fresh, PlaybackState::Failed] {
            assert_eq!(resolve(DRIVE, state), resolve(DRIVE, state));
        }
    }

    #[test]
    fn test_decision_accessors() {
        assert_eq!(RenderDecision::Placeholder.src(), None);
        assert!(native("a.mp4").is_native());
        assert!(!embed("x").is_native());
        assert_eq!(embed("x").src(), Some("x"));
    }
}

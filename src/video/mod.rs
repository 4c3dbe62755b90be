//! Video module - lesson video source resolution
//!
//! Features:
//! - Provider classification from arbitrary URL strings
//! - Embed / native stream URL derivation
//! - One-way fallback from native playback to the embed viewer

pub mod playback;
pub mod provider;
pub mod resolver;

pub use playback::{PlaybackSession, PlaybackState};
pub use provider::{ProviderKind, VideoSource, classify};
pub use resolver::{RenderDecision, resolve};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{generate_plan, lesson_video};
    use crate::profile::{Goal, UserProfile};
    use chrono::Utc;

    #[test]
    fn test_week_one_lessons_end_to_end() {
        let day1 = "";
        let day2 = "https://vimeo.com/123456789";
        let day3 = "not a url";

        let mut view = PlaybackSession::new(day1, "Dia 1");
        assert_eq!(view.decision(), RenderDecision::Placeholder);

        view.load(day2, "Dia 2");
        assert_eq!(
            view.decision().src(),
            Some("https://player.vimeo.com/video/123456789")
        );

        view.load(day3, "Dia 3");
        assert_eq!(view.source().provider, ProviderKind::Unknown);
        assert_eq!(
            view.decision(),
            RenderDecision::Embed {
                src: "not a url".to_string()
            }
        );
    }

    #[test]
    fn test_generated_plan_videos_resolve_natively() {
        let profile = UserProfile::anonymous(Goal::WeightLoss, Utc::now());
        let plan = generate_plan(&profile, Utc::now());
        for week in &plan.weeks {
            for day in &week.days {
                assert_eq!(day.video_url, lesson_video(week.week_number, day.day_number));
                let source = VideoSource::parse(&day.video_url);
                assert_eq!(source.provider, ProviderKind::GoogleDrive, "{}", day.video_url);
                assert!(resolve(&day.video_url, PlaybackState::Fresh).is_native());
            }
        }
    }
}

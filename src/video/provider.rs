//! Provider classification - which host a lesson URL belongs to

use std::sync::LazyLock;

use regex::Regex;

/// Hosting service behind a lesson video URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    YouTube,
    Vimeo,
    OneDrive,   // OneDrive / SharePoint
    GoogleDrive,
    DirectFile, // blob: or raw container file
    Unknown,
}

impl ProviderKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::YouTube => "YouTube",
            ProviderKind::Vimeo => "Vimeo",
            ProviderKind::OneDrive => "OneDrive",
            ProviderKind::GoogleDrive => "Google Drive",
            ProviderKind::DirectFile => "Arquivo direto",
            ProviderKind::Unknown => "Desconhecido",
        }
    }
}

/// YouTube ids are exactly this long; anything else is rejected
pub const YOUTUBE_ID_LEN: usize = 11;

static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^.*(?:(?:youtu\.be/|v/|vi/|u/[A-Za-z0-9_]/|embed/|shorts/)|(?:(?:watch)?\?vi?=|&vi?=))([^#&?]*).*",
    )
    .expect("youtube pattern")
});

static VIMEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"vimeo\.com/(\d+)").expect("vimeo pattern"));

static DRIVE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([^/]+)").expect("drive pattern"));

static MEDIA_EXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mp4|webm|ogg|mov|m4v)($|\?)").expect("media pattern"));

/// Extract an 11-character YouTube id from any known URL shape
pub fn youtube_id(url: &str) -> Option<String> {
    let caps = YOUTUBE_RE.captures(url.trim())?;
    let id = caps.get(1)?.as_str();
    (id.chars().count() == YOUTUBE_ID_LEN).then(|| id.to_string())
}

/// Numeric Vimeo id (`vimeo.com/<digits>`)
pub fn vimeo_id(url: &str) -> Option<String> {
    VIMEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Google Drive file id: the run of non-slash characters after `/d/`
pub fn drive_id(url: &str) -> Option<String> {
    DRIVE_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn is_youtube(url: &str) -> bool {
    youtube_id(url).is_some()
}

pub fn is_google_drive(url: &str) -> bool {
    drive_id(url).is_some()
}

pub fn is_vimeo(url: &str) -> bool {
    url.contains("vimeo.com")
}

pub fn is_onedrive(url: &str) -> bool {
    url.contains("sharepoint.com") || url.contains("1drv.ms")
}

/// Local blob reference or a raw container file, optionally with a query string
pub fn is_direct_media(url: &str) -> bool {
    url.starts_with("blob:") || MEDIA_EXT_RE.is_match(url)
}

/// One classification rule: a predicate plus the id extractor used once it matches
struct Rule {
    kind: ProviderKind,
    matches: fn(&str) -> bool,
    extract: fn(&str) -> Option<String>,
}

fn no_id(_: &str) -> Option<String> {
    None
}

/// Evaluated top to bottom, first match wins.
/// A Drive link carrying `v=` must never land on YouTube unless the id check passes.
const RULES: &[Rule] = &[
    Rule {
        kind: ProviderKind::YouTube,
        matches: is_youtube,
        extract: youtube_id,
    },
    Rule {
        kind: ProviderKind::Vimeo,
        matches: is_vimeo,
        extract: vimeo_id,
    },
    Rule {
        kind: ProviderKind::OneDrive,
        matches: is_onedrive,
        extract: no_id,
    },
    Rule {
        kind: ProviderKind::GoogleDrive,
        matches: is_google_drive,
        extract: drive_id,
    },
    Rule {
        kind: ProviderKind::DirectFile,
        matches: is_direct_media,
        extract: no_id,
    },
];

/// A lesson URL after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSource {
    pub raw_url: String,
    pub provider: ProviderKind,
    pub primary_id: Option<String>,
}

impl VideoSource {
    /// Classify an untrusted URL string. Never fails: unmatched input is `Unknown`.
    pub fn parse(raw_url: &str) -> Self {
        let (provider, primary_id) = if raw_url.trim().is_empty() {
            (ProviderKind::Unknown, None)
        } else {
            RULES
                .iter()
                .find(|rule| (rule.matches)(raw_url))
                .map(|rule| (rule.kind, (rule.extract)(raw_url)))
                .unwrap_or((ProviderKind::Unknown, None))
        };

        Self {
            raw_url: raw_url.to_string(),
            provider,
            primary_id,
        }
    }

    /// No video configured for this lesson
    pub fn is_empty(&self) -> bool {
        self.raw_url.trim().is_empty()
    }
}

pub fn classify(raw_url: &str) -> ProviderKind {
    VideoSource::parse(raw_url).provider
}

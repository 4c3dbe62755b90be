//! ironpath - BaseCalistenia four-week calisthenics program
//!
//! Fixed curriculum, local progress tracking and lesson videos from
//! YouTube, Vimeo, OneDrive, Google Drive or plain file links.

pub mod db;
pub mod donation;
pub mod plan;
pub mod profile;
pub mod quotes;
pub mod router;
pub mod tui;
pub mod video;

pub use db::Database;

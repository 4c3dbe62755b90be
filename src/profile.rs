//! User profile and workout history

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Training goal picked on onboarding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
pub enum Goal {
    #[serde(rename = "Perda de Peso")]
    #[value(name = "perda-de-peso", alias = "emagrecer")]
    WeightLoss,
    #[serde(rename = "Ganho de Massa")]
    #[value(name = "ganho-de-massa", alias = "massa")]
    MuscleGain,
}

impl Goal {
    pub fn label(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "Perda de Peso",
            Goal::MuscleGain => "Ganho de Massa",
        }
    }

    /// Word used in lesson titles and descriptions
    pub fn base_term(&self) -> &'static str {
        match self {
            Goal::MuscleGain => "Hipertrofia",
            Goal::WeightLoss => "Queima",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "🔥",
            Goal::MuscleGain => "💪",
        }
    }

    pub fn all() -> &'static [Goal] {
        &[Goal::WeightLoss, Goal::MuscleGain]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// One completed lesson. History is append-only, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub lesson_title: String,
    pub week_number: u8,
    pub day_number: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub goal: Goal,
    #[serde(default)]
    pub level: Level,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub joined_at: DateTime<Utc>,
    // Older saved profiles have no history
    #[serde(default)]
    pub history: Vec<WorkoutLog>,
}

/// Display name for profiles created without sign-up
pub const ANONYMOUS_USERNAME: &str = "Atleta";

impl UserProfile {
    pub fn anonymous(goal: Goal, joined_at: DateTime<Utc>) -> Self {
        Self {
            username: ANONYMOUS_USERNAME.to_string(),
            goal,
            level: Level::Intermediate,
            joined_at,
            history: Vec::new(),
        }
    }

    /// Prepend a log entry (history stays newest first)
    pub fn record(&mut self, log: WorkoutLog) {
        self.history.insert(0, log);
    }

    pub fn recent(&self, limit: usize) -> &[WorkoutLog] {
        &self.history[..limit.min(self.history.len())]
    }
}

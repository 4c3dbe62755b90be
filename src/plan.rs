//! Monthly plan - the fixed four-week calisthenics curriculum

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::{UserProfile, WorkoutLog};

pub const WEEKS: u8 = 4;
pub const DAYS_PER_WEEK: u8 = 7;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaySession {
    pub day_number: u8, // 1-7
    pub title: String,
    pub description: String,
    // Empty means no video configured
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    pub week_number: u8, // 1-4
    pub focus: String,
    pub days: Vec<DaySession>,
}

impl WeekPlan {
    pub fn day(&self, day_number: u8) -> Option<&DaySession> {
        self.days.iter().find(|d| d.day_number == day_number)
    }

    pub fn completed_count(&self) -> usize {
        self.days.iter().filter(|d| d.completed).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPlan {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub weeks: Vec<WeekPlan>,
}

impl MonthlyPlan {
    pub fn week(&self, week_number: u8) -> Option<&WeekPlan> {
        self.weeks.iter().find(|w| w.week_number == week_number)
    }

    pub fn day(&self, week_number: u8, day_number: u8) -> Option<&DaySession> {
        self.week(week_number)?.day(day_number)
    }

    /// Flip a lesson's completion. Returns the history entry when the lesson
    /// goes from open to done; un-completing never produces one.
    pub fn toggle_day(
        &mut self,
        week_number: u8,
        day_number: u8,
        now: DateTime<Utc>,
    ) -> Option<WorkoutLog> {
        let day = self
            .weeks
            .iter_mut()
            .find(|w| w.week_number == week_number)?
            .days
            .iter_mut()
            .find(|d| d.day_number == day_number)?;

        day.completed = !day.completed;
        day.completed.then(|| WorkoutLog {
            timestamp: now,
            lesson_title: day.title.clone(),
            week_number,
            day_number,
        })
    }

    pub fn completed_count(&self) -> usize {
        self.weeks.iter().map(WeekPlan::completed_count).sum()
    }

    pub fn total_sessions(&self) -> usize {
        self.weeks.iter().map(|w| w.days.len()).sum()
    }

    /// 4 weeks x 7 days, numbered densely from 1
    pub fn is_well_formed(&self) -> bool {
        self.weeks.len() == WEEKS as usize
            && self.weeks.iter().zip(1..=WEEKS).all(|(week, n)| {
                week.week_number == n
                    && week.days.len() == DAYS_PER_WEEK as usize
                    && week.days.iter().zip(1..=DAYS_PER_WEEK).all(|(day, d)| day.day_number == d)
            })
    }
}

const WEEK_FOCUSES: [&str; WEEKS as usize] = [
    "Base & Adaptação",
    "Progressão de Carga",
    "Intensidade Máxima",
    "Desafio Final & Deload",
];

/// Lesson videos keyed by (week, day)
const LESSON_VIDEOS: &[((u8, u8), &str)] = &[
    // Week 1
    ((1, 1), "https://drive.google.com/file/d/1cT7Du11Re9jsEtzRn3p4PzpykBH_roEw/view?usp=drive_link"),
    ((1, 2), "https://drive.google.com/file/d/1Z_jlwcJi1uQfcrSaSNyECrsIs8KCACSP/view?usp=drive_link"),
    ((1, 3), "https://drive.google.com/file/d/1a_Op29nzzwRlkXgq1c4BcYzMQ_TcwdP9/view?usp=drive_link"),
    ((1, 4), "https://drive.google.com/file/d/1F3EmxfJmOg7h1WUBvSSsWrbgnM7QQm8u/view?usp=drive_link"),
    ((1, 5), "https://drive.google.com/file/d/1N2gD6xcQKgD3RrR1xA_7YQCWxmhVmzPB/view?usp=drive_link"),
    ((1, 6), "https://drive.google.com/file/d/1beY_s2WcKeFOv-QN0pCKMxABUgcOrLT4/view?usp=drive_link"),
    ((1, 7), "https://drive.google.com/file/d/1hxBGALtKBxiEkcw_PAyOhoTzk7rbsbJC/view?usp=drive_link"),
    // Week 2
    ((2, 1), "https://drive.google.com/file/d/1G_XXZFmDuKvQLW46YQF_d9_fTKqiobCo/view?usp=drive_link"),
    ((2, 2), "https://drive.google.com/file/d/1yx5rzytuIcYVs5sn_DTP6GJpZ_foePFQ/view?usp=drive_link"),
    ((2, 3), "https://drive.google.com/file/d/1Lp5w465FrOns0QTC-TroCYq7jgvWkeGg/view?usp=drive_link"),
    ((2, 4), "https://drive.google.com/file/d/1QBnui8m5-oVZeFdelHfEjRABJqaqhnlV/view?usp=drive_link"),
    ((2, 5), "https://drive.google.com/file/d/10HX2xNJqphYrkBBvjPEuwGwMWpX9xbEO/view?usp=drive_link"),
    ((2, 6), "https://drive.google.com/file/d/1j5nW_POujF0aqWHay-APv3rw4RJYpY9N/view?usp=drive_link"),
    ((2, 7), "https://drive.google.com/file/d/1uUnQDwrBgVIc05cyIBflRJI2wikYZh5i/view?usp=drive_link"),
    // Week 3
    ((3, 1), "https://drive.google.com/file/d/1WIuUxGROKROMNiDZxEYB4KNaf06Ue9xV/view?usp=drive_link"),
    ((3, 2), "https://drive.google.com/file/d/1H4GDNQ3TKAvNHqC6ZLENVkI5aQjsRrjL/view?usp=drive_link"),
    ((3, 3), "https://drive.google.com/file/d/1f7MtMgAv7N1Rsd7W7SCCgJ2TFqYL96Lr/view?usp=drive_link"),
    ((3, 4), "https://drive.google.com/file/d/10ethQf8HDbZIyXB-H9sEFAjcgsKReM84/view?usp=drive_link"),
    ((3, 5), "https://drive.google.com/file/d/1Rcq8yGTrFdmA2ZVSLZuhVKEE1wRNJcoY/view?usp=drive_link"),
    ((3, 6), "https://drive.google.com/file/d/1Np20x0JtO0-UfE1wbAkd8y4wHjzJCuDv/view?usp=drive_link"),
    ((3, 7), "https://drive.google.com/file/d/1PYAT6Pth9qHs-OdamFnIErR6qBYjzfpf/view?usp=drive_link"),
    // Week 4
    ((4, 1), "https://drive.google.com/file/d/1lWgH9rOnN6g-li4xLPnBJCqSY55MqQDO/view?usp=drive_link"),
    ((4, 2), "https://drive.google.com/file/d/1cxyET4Ghh7RKmhtu1qlvYBzqIbfwMgWa/view?usp=drive_link"),
    ((4, 3), "https://drive.google.com/file/d/1ynGUHd9DC7HGd-yRG691rBu1l1xA9goL/view?usp=drive_link"),
    ((4, 4), "https://drive.google.com/file/d/1nP0cqNdXKke2G7egEz1Fz3_XR9gNRN9r/view?usp=drive_link"),
    ((4, 5), "https://drive.google.com/file/d/15SqfXPVcFYvVZEWvchc_BCinfXmqx7dC/view?usp=drive_link"),
    ((4, 6), "https://drive.google.com/file/d/1Fci_iMoxnVRl_Y7-wI4wufLdyPR0ZEKb/view?usp=drive_link"),
    ((4, 7), "https://drive.google.com/file/d/1GJ4GS-pZDN0ACgSEQjbcV-IwrXZ9WR2z/view?usp=drive_link"),
];

/// Video for a lesson, or "" when none is configured
pub fn lesson_video(week_number: u8, day_number: u8) -> &'static str {
    LESSON_VIDEOS
        .iter()
        .find(|(key, _)| *key == (week_number, day_number))
        .map(|(_, url)| *url)
        .unwrap_or("")
}

fn day_title(day_number: u8, base_term: &str) -> String {
    match day_number {
        1 => format!("Full Body ({})", base_term),
        2 => "Membros Inferiores".to_string(),
        3 => "Cardio & Core".to_string(),
        4 => "Membros Superiores".to_string(),
        5 => "Full Body Intenso".to_string(),
        6 => "Desafio Calistênico".to_string(),
        7 => "Mobilidade & Alongamento".to_string(),
        d => format!("Treino {} - Dia {}", base_term, d),
    }
}

/// Build the curriculum for a profile. Static table lookup, depends only on the goal.
pub fn generate_plan(profile: &UserProfile, created_at: DateTime<Utc>) -> MonthlyPlan {
    let base_term = profile.goal.base_term();

    let weeks = (1..=WEEKS)
        .map(|w| WeekPlan {
            week_number: w,
            focus: WEEK_FOCUSES[(w - 1) as usize].to_string(),
            days: (1..=DAYS_PER_WEEK)
                .map(|d| DaySession {
                    day_number: d,
                    title: day_title(d, base_term),
                    description: format!("Foco total em {}. Siga o vídeo e respeite seu ritmo.", base_term),
                    video_url: lesson_video(w, d).to_string(),
                    completed: false,
                })
                .collect(),
        })
        .collect();

    MonthlyPlan {
        id: created_at.timestamp_millis().to_string(),
        title: format!("Protocolo BaseCalistenia - {}", profile.goal.label()),
        description: "4 semanas de transformação com peso do corpo.".to_string(),
        created_at,
        weeks,
    }
}

//! View routing - which screen is showing and which lesson is selected

use anyhow::{Result, bail};
use tracing::debug;

use crate::plan::{DAYS_PER_WEEK, DaySession, MonthlyPlan, WEEKS, WeekPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Landing,
    Onboarding,
    Dashboard,
    Donation,
}

/// Screen state. The dashboard shows either the module grid (no week selected)
/// or one week's lesson player.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    view: AppView,
    selected_week: Option<u8>,
    active_day: u8,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self {
            view: AppView::Landing,
            selected_week: None,
            active_day: 1,
        }
    }
}

impl ViewRouter {
    /// Returning users go straight to the dashboard
    pub fn restore(has_profile: bool) -> Self {
        Self {
            view: if has_profile { AppView::Dashboard } else { AppView::Landing },
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppView {
        self.view
    }

    pub fn selected_week(&self) -> Option<u8> {
        self.selected_week
    }

    pub fn active_day(&self) -> u8 {
        self.active_day
    }

    fn go(&mut self, view: AppView) {
        debug!(from = ?self.view, to = ?view, "View change");
        self.view = view;
    }

    /// Landing -> Onboarding
    pub fn start_flow(&mut self) {
        if self.view == AppView::Landing {
            self.go(AppView::Onboarding);
        }
    }

    /// Onboarding -> Dashboard, once the profile and plan exist
    pub fn finish_onboarding(&mut self) {
        if self.view == AppView::Onboarding {
            self.selected_week = None;
            self.active_day = 1;
            self.go(AppView::Dashboard);
        }
    }

    /// Open a week module; the first day becomes active
    pub fn select_week(&mut self, week_number: u8) -> Result<()> {
        if self.view != AppView::Dashboard {
            bail!("Weeks can only be opened from the dashboard");
        }
        if !(1..=WEEKS).contains(&week_number) {
            bail!("Week must be between 1 and {}, got {}", WEEKS, week_number);
        }
        self.selected_week = Some(week_number);
        self.active_day = 1;
        Ok(())
    }

    pub fn select_day(&mut self, day_number: u8) -> Result<()> {
        if self.selected_week.is_none() {
            bail!("No week selected");
        }
        if !(1..=DAYS_PER_WEEK).contains(&day_number) {
            bail!("Day must be between 1 and {}, got {}", DAYS_PER_WEEK, day_number);
        }
        self.active_day = day_number;
        Ok(())
    }

    /// Back from a week to the module grid
    pub fn back_to_modules(&mut self) {
        self.selected_week = None;
    }

    /// Dashboard <-> Donation. Week selection survives the round trip.
    pub fn toggle_donation(&mut self) {
        match self.view {
            AppView::Dashboard => self.go(AppView::Donation),
            AppView::Donation => self.go(AppView::Dashboard),
            _ => {}
        }
    }

    /// Back to landing with nothing selected (stored data is cleared by the caller)
    pub fn reset(&mut self) {
        *self = Self::default();
        debug!("Router reset");
    }

    pub fn current_week<'a>(&self, plan: &'a MonthlyPlan) -> Option<&'a WeekPlan> {
        plan.week(self.selected_week?)
    }

    /// Lesson feeding the video view: its `video_url` and `title`
    pub fn current_session<'a>(&self, plan: &'a MonthlyPlan) -> Option<&'a DaySession> {
        self.current_week(plan)?.day(self.active_day)
    }
}

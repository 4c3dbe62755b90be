//! Database module - SQLite storage for the profile and the monthly plan
//!
//! Both are stored as JSON documents under fixed keys. Anything that does
//! not parse is dropped and the caller starts from an empty state.

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::plan::{MonthlyPlan, generate_plan};
use crate::profile::UserProfile;

pub const PROFILE_KEY: &str = "ironpath_user";
pub const PLAN_KEY: &str = "ironpath_monthly_plan";

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database (`:memory:` works for throwaway stores)
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Raw stored text for a key
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Load a JSON document. Corrupt values are deleted and read as missing.
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };

        if raw == "undefined" {
            self.remove(key)?;
            return Ok(None);
        }

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "Discarding corrupt stored value");
                self.remove(key)?;
                Ok(None)
            }
        }
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.put_raw(key, &json)
    }

    pub fn load_profile(&self) -> Result<Option<UserProfile>> {
        self.load_json(PROFILE_KEY)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.save_json(PROFILE_KEY, profile)
    }

    /// Load the plan; one that is not 4 weeks x 7 days counts as corrupt
    pub fn load_plan(&self) -> Result<Option<MonthlyPlan>> {
        match self.load_json::<MonthlyPlan>(PLAN_KEY)? {
            Some(plan) if !plan.is_well_formed() => {
                warn!(plan_id = %plan.id, "Discarding malformed stored plan");
                self.remove(PLAN_KEY)?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    pub fn save_plan(&self, plan: &MonthlyPlan) -> Result<()> {
        self.save_json(PLAN_KEY, plan)
    }

    /// Startup load. A profile whose plan was lost gets a freshly generated one.
    pub fn restore(&self) -> Result<(Option<UserProfile>, Option<MonthlyPlan>)> {
        let profile = self.load_profile()?;
        let plan = match (self.load_plan()?, &profile) {
            (None, Some(profile)) => {
                let plan = generate_plan(profile, Utc::now());
                self.save_plan(&plan)?;
                info!(plan_id = %plan.id, "Regenerated missing plan");
                Some(plan)
            }
            (plan, _) => plan,
        };
        Ok((profile, plan))
    }

    /// Wipe profile and plan
    pub fn reset(&self) -> Result<()> {
        self.remove(PROFILE_KEY)?;
        self.remove(PLAN_KEY)?;
        info!("Stored profile and plan removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Goal, WorkoutLog};
    use chrono::TimeZone;

    fn memory_db() -> Database {
        Database::open(":memory:").unwrap()
    }

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_empty_store() {
        let db = memory_db();
        assert!(db.load_profile().unwrap().is_none());
        assert!(db.load_plan().unwrap().is_none());
    }

    #[test]
    fn test_profile_round_trip() {
        let db = memory_db();
        let mut profile = UserProfile::anonymous(Goal::MuscleGain, fixed_now());
        profile.record(WorkoutLog {
            timestamp: fixed_now(),
            lesson_title: "Full Body (Hipertrofia)".to_string(),
            week_number: 1,
            day_number: 1,
        });
        db.save_profile(&profile).unwrap();
        assert_eq!(db.load_profile().unwrap(), Some(profile));
    }

    #[test]
    fn test_plan_overwrite() {
        let db = memory_db();
        let profile = UserProfile::anonymous(Goal::WeightLoss, fixed_now());
        let mut plan = generate_plan(&profile, fixed_now());
        db.save_plan(&plan).unwrap();

        plan.toggle_day(2, 4, fixed_now());
        db.save_plan(&plan).unwrap();

        let loaded = db.load_plan().unwrap().unwrap();
        assert!(loaded.day(2, 4).unwrap().completed);
        assert_eq!(loaded.completed_count(), 1);
    }

    #[test]
    fn test_corrupt_profile_discarded() {
        let db = memory_db();
        db.put_raw(PROFILE_KEY, "{not json").unwrap();
        assert!(db.load_profile().unwrap().is_none());
        // removed from storage
        assert!(db.get_raw(PROFILE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_undefined_literal_discarded() {
        let db = memory_db();
        db.put_raw(PLAN_KEY, "undefined").unwrap();
        assert!(db.load_plan().unwrap().is_none());
        assert!(db.get_raw(PLAN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_malformed_plan_discarded() {
        let db = memory_db();
        let profile = UserProfile::anonymous(Goal::WeightLoss, fixed_now());
        let mut plan = generate_plan(&profile, fixed_now());
        plan.weeks.truncate(3);
        db.save_plan(&plan).unwrap();
        assert!(db.load_plan().unwrap().is_none());
    }

    #[test]
    fn test_profile_without_history_loads() {
        let db = memory_db();
        db.put_raw(
            PROFILE_KEY,
            r#"{"username":"Atleta","goal":"Ganho de Massa","level":"beginner","joinedAt":1700000000000}"#,
        )
        .unwrap();
        let profile = db.load_profile().unwrap().unwrap();
        assert!(profile.history.is_empty());
    }

    #[test]
    fn test_restore_regenerates_lost_plan() {
        let db = memory_db();
        let profile = UserProfile::anonymous(Goal::MuscleGain, fixed_now());
        db.save_profile(&profile).unwrap();
        db.put_raw(PLAN_KEY, "[]").unwrap();

        let (restored, plan) = db.restore().unwrap();
        assert_eq!(restored, Some(profile));
        let plan = plan.unwrap();
        assert!(plan.is_well_formed());
        assert_eq!(plan.title, "Protocolo BaseCalistenia - Ganho de Massa");
        assert!(db.load_plan().unwrap().is_some());
    }

    #[test]
    fn test_restore_without_profile() {
        let db = memory_db();
        let (profile, plan) = db.restore().unwrap();
        assert!(profile.is_none());
        assert!(plan.is_none());
    }

    #[test]
    fn test_reset_clears_both() {
        let db = memory_db();
        let profile = UserProfile::anonymous(Goal::WeightLoss, fixed_now());
        db.save_plan(&generate_plan(&profile, fixed_now())).unwrap();
        db.save_profile(&profile).unwrap();

        db.reset().unwrap();
        assert!(db.load_profile().unwrap().is_none());
        assert!(db.load_plan().unwrap().is_none());
    }
}

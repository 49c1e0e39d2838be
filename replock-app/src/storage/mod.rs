// Local storage module using sled embedded database.
// Lock settings are a simple keyed record store: one tree per record
// type, package name (or record id) as the key.

use anyhow::{Context, Result};
use sled::Db;
use std::path::PathBuf;

use crate::models::{LockedApp, UnlockGrant, WorkoutRecord};

const LOCKED_APPS_TREE: &str = "locked_apps";
const GRANTS_TREE: &str = "unlock_grants";
const WORKOUTS_TREE: &str = "workouts";

/// Storage manager for lock settings, unlock grants and workout history
pub struct LockStore {
    db: Db,
}

impl LockStore {
    /// Get database directory path (~/.replock/)
    pub fn db_path() -> Result<PathBuf> {
        // Check for test environment variable first
        if let Ok(test_path) = std::env::var("REPLOCK_DB_PATH") {
            return Ok(PathBuf::from(test_path));
        }

        let config_dir = crate::config::Config::config_dir()?;
        Ok(config_dir.join("db"))
    }

    /// Initialize storage at the default path
    pub fn init() -> Result<Self> {
        Self::open_at(Self::db_path()?)
    }

    /// Initialize storage at a custom path
    pub fn open_at(path: PathBuf) -> Result<Self> {
        tracing::info!("Opening sled database at {:?}", path);

        let db = sled::open(path).context("Failed to open sled database")?;

        Ok(Self { db })
    }

    // Locked app operations

    /// Save a locked app, keyed by package name
    pub fn save_locked_app(&self, app: &LockedApp) -> Result<()> {
        let tree = self
            .db
            .open_tree(LOCKED_APPS_TREE)
            .context("Failed to open locked apps tree")?;

        let key = app.package_name.as_bytes();
        let value = bincode::serialize(app).context("Failed to serialize locked app")?;

        tree.insert(key, value)
            .context("Failed to insert locked app")?;

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!("Saved lock for {}", app.package_name);
        Ok(())
    }

    /// Get a locked app by package name
    pub fn get_locked_app(&self, package_name: &str) -> Result<Option<LockedApp>> {
        let tree = self
            .db
            .open_tree(LOCKED_APPS_TREE)
            .context("Failed to open locked apps tree")?;

        if let Some(value) = tree
            .get(package_name.as_bytes())
            .context("Failed to get locked app")?
        {
            let app: LockedApp =
                bincode::deserialize(&value).context("Failed to deserialize locked app")?;
            Ok(Some(app))
        } else {
            Ok(None)
        }
    }

    /// List all locked apps, sorted by package name
    pub fn list_locked_apps(&self) -> Result<Vec<LockedApp>> {
        let tree = self
            .db
            .open_tree(LOCKED_APPS_TREE)
            .context("Failed to open locked apps tree")?;

        let mut apps = Vec::new();

        for item in tree.iter() {
            let (_key, value) = item.context("Failed to iterate locked apps")?;
            let app: LockedApp =
                bincode::deserialize(&value).context("Failed to deserialize locked app")?;
            apps.push(app);
        }

        apps.sort_by(|a, b| a.package_name.cmp(&b.package_name));

        Ok(apps)
    }

    /// Remove a lock; also drops any grant for the package
    pub fn delete_locked_app(&self, package_name: &str) -> Result<bool> {
        let tree = self
            .db
            .open_tree(LOCKED_APPS_TREE)
            .context("Failed to open locked apps tree")?;

        let deleted = tree
            .remove(package_name.as_bytes())
            .context("Failed to delete locked app")?
            .is_some();

        if deleted {
            self.clear_grant(package_name)?;
            self.db.flush().context("Failed to flush database")?;
            tracing::debug!("Deleted lock for {}", package_name);
        }

        Ok(deleted)
    }

    // Unlock grant operations: one grant per package, latest wins

    /// Save the current grant for a package
    pub fn save_grant(&self, grant: &UnlockGrant) -> Result<()> {
        let tree = self
            .db
            .open_tree(GRANTS_TREE)
            .context("Failed to open grants tree")?;

        let key = grant.package_name.as_bytes();
        let value = bincode::serialize(grant).context("Failed to serialize grant")?;

        tree.insert(key, value).context("Failed to insert grant")?;

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!("Saved grant for {}", grant.package_name);
        Ok(())
    }

    /// Get the current grant for a package
    pub fn get_grant(&self, package_name: &str) -> Result<Option<UnlockGrant>> {
        let tree = self
            .db
            .open_tree(GRANTS_TREE)
            .context("Failed to open grants tree")?;

        if let Some(value) = tree
            .get(package_name.as_bytes())
            .context("Failed to get grant")?
        {
            let grant: UnlockGrant =
                bincode::deserialize(&value).context("Failed to deserialize grant")?;
            Ok(Some(grant))
        } else {
            Ok(None)
        }
    }

    /// List all grants
    pub fn list_grants(&self) -> Result<Vec<UnlockGrant>> {
        let tree = self
            .db
            .open_tree(GRANTS_TREE)
            .context("Failed to open grants tree")?;

        let mut grants = Vec::new();

        for item in tree.iter() {
            let (_key, value) = item.context("Failed to iterate grants")?;
            let grant: UnlockGrant =
                bincode::deserialize(&value).context("Failed to deserialize grant")?;
            grants.push(grant);
        }

        Ok(grants)
    }

    /// Drop the grant for a package
    pub fn clear_grant(&self, package_name: &str) -> Result<bool> {
        let tree = self
            .db
            .open_tree(GRANTS_TREE)
            .context("Failed to open grants tree")?;

        let removed = tree
            .remove(package_name.as_bytes())
            .context("Failed to remove grant")?
            .is_some();

        if removed {
            self.db.flush().context("Failed to flush database")?;
        }

        Ok(removed)
    }

    // Workout history operations

    /// Save a workout record
    pub fn save_workout(&self, record: &WorkoutRecord) -> Result<()> {
        let tree = self
            .db
            .open_tree(WORKOUTS_TREE)
            .context("Failed to open workouts tree")?;

        let key = record.id.as_bytes();
        let value = bincode::serialize(record).context("Failed to serialize workout")?;

        tree.insert(key, value)
            .context("Failed to insert workout")?;

        self.db.flush().context("Failed to flush database")?;

        tracing::debug!("Saved workout {}", record.id);
        Ok(())
    }

    /// List workout records, most recent first
    pub fn list_workouts(&self) -> Result<Vec<WorkoutRecord>> {
        let tree = self
            .db
            .open_tree(WORKOUTS_TREE)
            .context("Failed to open workouts tree")?;

        let mut records = Vec::new();

        for item in tree.iter() {
            let (_key, value) = item.context("Failed to iterate workouts")?;
            let record: WorkoutRecord =
                bincode::deserialize(&value).context("Failed to deserialize workout")?;
            records.push(record);
        }

        records.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(records)
    }
}

use anyhow::Result;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use replock_app::models::LockedApp;
use replock_app::services::{LockPolicyError, LockPolicyService};
use replock_app::storage::LockStore;

fn setup_policy() -> Result<(LockPolicyService, TempDir)> {
    let dir = TempDir::new()?;
    let store = LockStore::open_at(dir.path().join("db"))?;
    Ok((LockPolicyService::new(store), dir))
}

#[test]
fn test_unlock_requires_enough_reps() -> Result<()> {
    let (policy, _dir) = setup_policy()?;
    let now = Utc::now();

    policy.lock_app(LockedApp::new(
        "com.example.social".to_string(),
        "Social".to_string(),
        10,
        30,
    ))?;

    let decision = policy.evaluate_unlock("com.example.social", 7, now)?;
    assert!(!decision.unlocked);
    assert_eq!(decision.remaining(), 3);
    assert!(!policy.is_unlocked("com.example.social", now)?);

    let decision = policy.evaluate_unlock("com.example.social", 10, now)?;
    assert!(decision.unlocked);
    assert!(policy.is_unlocked("com.example.social", now)?);

    Ok(())
}

#[test]
fn test_grant_expires_after_unlock_window() -> Result<()> {
    let (policy, _dir) = setup_policy()?;
    let now = Utc::now();

    policy.lock_app(LockedApp::new(
        "com.example.a".to_string(),
        "A".to_string(),
        5,
        30,
    ))?;
    policy.evaluate_unlock("com.example.a", 5, now)?;

    assert!(policy.is_unlocked("com.example.a", now + Duration::minutes(29))?);
    assert!(!policy.is_unlocked("com.example.a", now + Duration::minutes(31))?);

    Ok(())
}

#[test]
fn test_unknown_package_is_not_gated() -> Result<()> {
    let (policy, _dir) = setup_policy()?;
    let now = Utc::now();

    // No lock registered: the app is simply open
    assert!(policy.is_unlocked("com.example.unknown", now)?);

    // But evaluating the gate for it is a caller error
    let result = policy.evaluate_unlock("com.example.unknown", 10, now);
    assert!(matches!(result, Err(LockPolicyError::AppNotLocked(_))));

    Ok(())
}

#[test]
fn test_disabled_lock_is_not_enforced() -> Result<()> {
    let (policy, _dir) = setup_policy()?;
    let now = Utc::now();

    let mut app = LockedApp::new("com.example.b".to_string(), "B".to_string(), 5, 30);
    app.update(None, None, Some(false));
    policy.lock_app(app)?;

    assert!(policy.is_unlocked("com.example.b", now)?);

    Ok(())
}

#[test]
fn test_prune_drops_only_expired_grants() -> Result<()> {
    let (policy, _dir) = setup_policy()?;
    let now = Utc::now();

    policy.lock_app(LockedApp::new(
        "com.example.short".to_string(),
        "Short".to_string(),
        1,
        5,
    ))?;
    policy.lock_app(LockedApp::new(
        "com.example.long".to_string(),
        "Long".to_string(),
        1,
        120,
    ))?;

    policy.evaluate_unlock("com.example.short", 1, now)?;
    policy.evaluate_unlock("com.example.long", 1, now)?;

    let later = now + Duration::minutes(10);
    let pruned = policy.prune_expired(later)?;
    assert_eq!(pruned, 1);

    assert!(!policy.is_unlocked("com.example.short", later)?);
    assert!(policy.is_unlocked("com.example.long", later)?);

    Ok(())
}

#[test]
fn test_remove_lock_revokes_access_control() -> Result<()> {
    let (policy, _dir) = setup_policy()?;
    let now = Utc::now();

    policy.lock_app(LockedApp::new(
        "com.example.c".to_string(),
        "C".to_string(),
        5,
        30,
    ))?;
    assert!(!policy.is_unlocked("com.example.c", now)?);

    assert!(policy.remove_lock("com.example.c")?);
    assert!(policy.is_unlocked("com.example.c", now)?);
    assert!(!policy.remove_lock("com.example.c")?);

    Ok(())
}

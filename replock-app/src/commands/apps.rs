use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use crate::config::Config;
use crate::models::LockedApp;
use crate::services::LockPolicyService;
use crate::storage::LockStore;

fn open_policy() -> Result<LockPolicyService> {
    Ok(LockPolicyService::new(LockStore::init()?))
}

pub async fn list_apps() -> Result<()> {
    let policy = open_policy()?;
    let apps = policy.locked_apps()?;

    if apps.is_empty() {
        println!("No locked apps. Add one with `replock apps lock <package>`.");
        return Ok(());
    }

    let now = Utc::now();
    println!("Locked apps:");
    println!();
    for app in apps {
        let status = if !app.enabled {
            "disabled".dimmed()
        } else if policy.is_unlocked(&app.package_name, now)? {
            "unlocked".green()
        } else {
            "locked".red()
        };

        println!(
            "  {} ({}) - {} reps, {} min per unlock [{}]",
            app.display_name.bold(),
            app.package_name,
            app.required_reps,
            app.unlock_minutes,
            status
        );
    }

    Ok(())
}

pub async fn lock_app(
    package: String,
    name: Option<String>,
    reps: Option<u32>,
    minutes: Option<i64>,
) -> Result<()> {
    let config = Config::load()?;
    let policy = open_policy()?;

    let app = LockedApp::new(
        package.clone(),
        name.unwrap_or_else(|| package.clone()),
        reps.unwrap_or(config.locks.required_reps),
        minutes.unwrap_or(config.locks.unlock_minutes),
    );

    let required = app.required_reps;
    policy.lock_app(app)?;

    println!(
        "{} {} locked behind {} push-ups",
        "Locked:".green().bold(),
        package,
        required
    );

    Ok(())
}

pub async fn unlock_app(package: &str) -> Result<()> {
    let policy = open_policy()?;

    if policy.remove_lock(package)? {
        println!("{} lock removed for {}", "Done:".green().bold(), package);
    } else {
        println!("{} no lock found for {}", "Note:".yellow().bold(), package);
    }

    Ok(())
}

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::storage::LockStore;

/// Show workout history
#[derive(Args)]
pub struct StatsCommand {
    /// Number of sessions to show
    #[arg(short, long, default_value = "10")]
    limit: usize,
}

impl StatsCommand {
    pub async fn execute(self) -> Result<()> {
        let store = LockStore::init()?;
        let records = store.list_workouts()?;

        if records.is_empty() {
            println!("No workouts recorded yet.");
            return Ok(());
        }

        let total: u32 = records.iter().map(|r| r.total_reps).sum();
        println!("{} sessions, {} push-ups all time", records.len(), total);
        println!();

        for record in records.iter().take(self.limit) {
            let target = record
                .target_package
                .as_deref()
                .map(|p| format!(" -> {p}"))
                .unwrap_or_default();

            println!(
                "  {}  {:>4} reps  {:>4}s{}",
                record.date.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                record.total_reps.to_string().bold(),
                record.duration_seconds,
                target
            );
        }

        Ok(())
    }
}

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use colored::Colorize;

use replock_core::session::CounterSession;
use replock_core::unlock;
use replock_core::FeatureExtractor;

use crate::config::Config;
use crate::models::WorkoutRecord;
use crate::platform::{Notifier, TracingNotifier};
use crate::services::replay;
use crate::services::LockPolicyService;
use crate::storage::LockStore;

/// Run a counting session over a recorded frame file
#[derive(Args)]
pub struct SessionCommand {
    /// Path to a JSON recording of detector frames
    recording: PathBuf,

    /// Evaluate the unlock gate for this package when the session ends
    #[arg(short, long)]
    package: Option<String>,

    /// Override the required rep count (otherwise taken from the lock)
    #[arg(long)]
    required: Option<u32>,
}

impl SessionCommand {
    pub async fn execute(self) -> Result<()> {
        let config = Config::load()?;

        let frames = replay::load_recording(&self.recording)?;
        if frames.is_empty() {
            println!("{} recording contains no frames", "Note:".yellow().bold());
            return Ok(());
        }

        let duration_seconds = frames
            .last()
            .map(|f| f.timestamp_ms.saturating_sub(frames[0].timestamp_ms) / 1000)
            .unwrap_or(0);
        let frame_count = frames.len();

        let extractor =
            FeatureExtractor::new().with_confidence_threshold(config.detector.confidence_threshold);
        let mut session = CounterSession::with_extractor(extractor)
            .with_thresholds(config.thresholds.to_core());

        session.on_rep_completed(|event| {
            TracingNotifier.rep_completed(event.count);
            println!("  {} rep {}", "+".green().bold(), event.count);
        });

        println!(
            "Replaying {} frames from {}",
            frame_count,
            self.recording.display()
        );

        let session = replay::replay(session, frames).await?;
        let total_reps = session.current_count();

        println!();
        println!(
            "{} {} push-ups in {}s",
            "Session complete:".bold(),
            total_reps,
            duration_seconds
        );

        let store = LockStore::init()?;
        store.save_workout(&WorkoutRecord::new(
            total_reps,
            duration_seconds,
            self.package.clone(),
        ))?;

        match (self.package, self.required) {
            (Some(package), _) => {
                let policy = LockPolicyService::new(store);
                let now = Utc::now();
                let decision = policy.evaluate_unlock(&package, total_reps, now)?;

                if decision.unlocked {
                    println!("{} {} is unlocked", "Unlocked:".green().bold(), package);
                } else {
                    println!(
                        "{} {} more push-ups needed for {}",
                        "Locked:".red().bold(),
                        decision.remaining(),
                        package
                    );
                }
            }
            (None, Some(required)) => {
                let decision = unlock::evaluate(total_reps, required);
                if decision.unlocked {
                    println!("{} requirement of {} met", "Passed:".green().bold(), required);
                } else {
                    println!(
                        "{} {} short of the requirement",
                        "Failed:".red().bold(),
                        decision.remaining()
                    );
                }
            }
            (None, None) => {}
        }

        Ok(())
    }
}

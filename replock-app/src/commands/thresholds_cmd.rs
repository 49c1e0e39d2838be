use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;

use crate::config::{Config, ThresholdsConfig};

/// Threshold field selector for the CLI
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThresholdFieldArg {
    ElbowDown,
    ElbowUp,
    ShoulderDown,
    ShoulderUp,
}

pub async fn show_thresholds() -> Result<()> {
    let config = Config::load()?;
    print_thresholds(&config.thresholds);
    Ok(())
}

pub async fn set_threshold(field: ThresholdFieldArg, value: f32) -> Result<()> {
    let mut config = Config::load()?;

    match field {
        ThresholdFieldArg::ElbowDown => config.thresholds.elbow_down = value,
        ThresholdFieldArg::ElbowUp => config.thresholds.elbow_up = value,
        ThresholdFieldArg::ShoulderDown => config.thresholds.shoulder_down = value,
        ThresholdFieldArg::ShoulderUp => config.thresholds.shoulder_up = value,
    }

    // The store itself stays permissive; warn here at the UI boundary
    if !config.thresholds.to_core().is_ordered() {
        println!(
            "{} thresholds are misordered (expected elbow-down < elbow-up \
             and shoulder-up < shoulder-down); counting may stall or misfire",
            "Warning:".yellow().bold()
        );
    }

    config.save()?;
    print_thresholds(&config.thresholds);

    Ok(())
}

pub async fn reset_thresholds() -> Result<()> {
    let mut config = Config::load()?;
    config.thresholds = ThresholdsConfig::default();
    config.save()?;

    println!("Thresholds restored to defaults");
    print_thresholds(&config.thresholds);

    Ok(())
}

fn print_thresholds(thresholds: &ThresholdsConfig) {
    println!("Classification thresholds (degrees):");
    println!("  elbow-down:    {:>6.1}", thresholds.elbow_down);
    println!("  elbow-up:      {:>6.1}", thresholds.elbow_up);
    println!("  shoulder-down: {:>6.1}", thresholds.shoulder_down);
    println!("  shoulder-up:   {:>6.1}", thresholds.shoulder_up);
}

//! OS integration ports. The mobile shell implements these against the
//! real platform services; this crate only needs the narrow interfaces,
//! plus a logging-backed notifier for the CLI.

use chrono::{DateTime, Utc};

/// Reports which application currently holds the foreground
pub trait ForegroundAppMonitor {
    fn foreground_package(&self) -> Option<String>;
}

/// Presents the counting overlay on top of a blocked app
pub trait OverlayPresenter {
    fn show_counter(&self, count: u32, required: u32);
    fn dismiss(&self);
}

/// Delivers user-facing notifications for counting and unlock events
pub trait Notifier {
    fn rep_completed(&self, count: u32);
    fn app_unlocked(&self, package_name: &str, until: DateTime<Utc>);
}

/// Notifier that writes to the structured log; used by the CLI where no
/// notification surface exists
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn rep_completed(&self, count: u32) {
        tracing::info!(count, "push-up completed");
    }

    fn app_unlocked(&self, package_name: &str, until: DateTime<Utc>) {
        tracing::info!(package = %package_name, until = %until, "app unlocked");
    }
}

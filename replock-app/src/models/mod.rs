mod locked_app;
mod unlock_grant;
mod workout;

pub use locked_app::LockedApp;
pub use unlock_grant::UnlockGrant;
pub use workout::WorkoutRecord;

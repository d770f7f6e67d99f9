//! droid-perms - Runtime permission request flow tracker
//!
//! Implements the decision logic behind an Android-style runtime
//! permission flow: partition a batch of permission keys into
//! satisfied / request / rationale-first, persist enough history to
//! tell "never asked" apart from "don't ask again", and classify
//! grant results after the fact. All platform interaction sits behind
//! the [`Platform`] trait, all persistence behind [`RecordStore`];
//! nothing in the crate touches Android itself.

pub mod catalog;
pub mod error;
pub mod platform;
pub mod record;
pub mod store;
pub mod tracker;

pub use error::{PermError, Result};
pub use platform::{Platform, StubPlatform};
pub use record::RequestRecord;
pub use store::{FileStore, MemoryStore, RecordStore};
pub use tracker::{
    Action, Decision, GrantOutcome, PermissionStatus, PermissionTracker, ReconciledOutcome,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Well-known runtime permission keys
pub mod common {
    /// Location
    pub const ACCESS_FINE_LOCATION: &str = "android.permission.ACCESS_FINE_LOCATION";
    pub const ACCESS_COARSE_LOCATION: &str = "android.permission.ACCESS_COARSE_LOCATION";
    pub const ACCESS_BACKGROUND_LOCATION: &str = "android.permission.ACCESS_BACKGROUND_LOCATION";

    /// Camera and microphone
    pub const CAMERA: &str = "android.permission.CAMERA";
    pub const RECORD_AUDIO: &str = "android.permission.RECORD_AUDIO";

    /// Storage
    pub const READ_EXTERNAL_STORAGE: &str = "android.permission.READ_EXTERNAL_STORAGE";
    pub const WRITE_EXTERNAL_STORAGE: &str = "android.permission.WRITE_EXTERNAL_STORAGE";
    pub const READ_MEDIA_IMAGES: &str = "android.permission.READ_MEDIA_IMAGES";
    pub const READ_MEDIA_VIDEO: &str = "android.permission.READ_MEDIA_VIDEO";
    pub const READ_MEDIA_AUDIO: &str = "android.permission.READ_MEDIA_AUDIO";

    /// Contacts
    pub const READ_CONTACTS: &str = "android.permission.READ_CONTACTS";
    pub const WRITE_CONTACTS: &str = "android.permission.WRITE_CONTACTS";

    /// Phone and SMS
    pub const READ_PHONE_STATE: &str = "android.permission.READ_PHONE_STATE";
    pub const CALL_PHONE: &str = "android.permission.CALL_PHONE";
    pub const SEND_SMS: &str = "android.permission.SEND_SMS";

    /// Notifications
    pub const POST_NOTIFICATIONS: &str = "android.permission.POST_NOTIFICATIONS";
}

//! Platform Seam
//!
//! The tracker talks to the OS through this trait. Hosts implement it
//! against the real permission machinery (a JNI shim, an emulator
//! bridge, a test double); the tracker itself stays platform-free.

use std::collections::{HashMap, HashSet};

use tracing::debug;

/// External permission machinery, treated as a black box.
pub trait Platform {
    /// TRUE if the permission is currently granted.
    fn is_granted(&self, key: &str) -> bool;

    /// TRUE if the platform suggests an explanatory prompt before
    /// re-asking (the user denied once without blocking permanently).
    fn should_show_rationale(&self, key: &str) -> bool;

    /// Fire-and-forget request; results are delivered later out of band
    /// and fed back through `PermissionTracker::reconcile`.
    fn request(&mut self, keys: &[String], request_code: u32);

    /// Group metadata lookup. `None` means unresolvable; callers fall
    /// back to the built-in catalog and finally the raw key.
    fn permission_group(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Scripted platform double.
///
/// Grant and rationale answers come from maps set up in advance; every
/// dispatched request is recorded for inspection. Useful in tests and in
/// hosts that replay captured device state.
#[derive(Debug, Default)]
pub struct StubPlatform {
    granted: HashSet<String>,
    rationale: HashSet<String>,
    groups: HashMap<String, String>,
    /// Requests dispatched so far, in order.
    pub requests: Vec<(Vec<String>, u32)>,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_granted(&mut self, key: &str, granted: bool) {
        if granted {
            self.granted.insert(key.to_string());
        } else {
            self.granted.remove(key);
        }
    }

    pub fn set_rationale(&mut self, key: &str, rationale: bool) {
        if rationale {
            self.rationale.insert(key.to_string());
        } else {
            self.rationale.remove(key);
        }
    }

    pub fn set_group(&mut self, key: &str, group: &str) {
        self.groups.insert(key.to_string(), group.to_string());
    }

    /// Keys of the most recently dispatched request, if any.
    pub fn last_request(&self) -> Option<&(Vec<String>, u32)> {
        self.requests.last()
    }
}

impl Platform for StubPlatform {
    fn is_granted(&self, key: &str) -> bool {
        self.granted.contains(key)
    }

    fn should_show_rationale(&self, key: &str) -> bool {
        self.rationale.contains(key)
    }

    fn request(&mut self, keys: &[String], request_code: u32) {
        debug!("stub request x{} code {}", keys.len(), request_code);
        self.requests.push((keys.to_vec(), request_code));
    }

    fn permission_group(&self, key: &str) -> Option<String> {
        self.groups.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_platform_scripting() {
        let mut platform = StubPlatform::new();
        platform.set_granted("android.permission.CAMERA", true);
        platform.set_rationale("android.permission.RECORD_AUDIO", true);

        assert!(platform.is_granted("android.permission.CAMERA"));
        assert!(!platform.is_granted("android.permission.RECORD_AUDIO"));
        assert!(platform.should_show_rationale("android.permission.RECORD_AUDIO"));
        assert_eq!(platform.permission_group("android.permission.CAMERA"), None);

        platform.request(&["android.permission.RECORD_AUDIO".to_string()], 42);
        let (keys, code) = platform.last_request().unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(*code, 42);
    }
}

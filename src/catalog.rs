//! Permission Catalog
//!
//! Built-in metadata for common Android permissions: group labels and
//! protection levels. Used when the platform cannot resolve grouping
//! info itself; a key missing here falls back to being its own group.

/// Permission protection level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionLevel {
    Normal,
    Dangerous,
    Signature,
}

impl ProtectionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionLevel::Normal => "normal",
            ProtectionLevel::Dangerous => "dangerous",
            ProtectionLevel::Signature => "signature",
        }
    }
}

/// (permission key, group label, protection level)
type CatalogEntry = (&'static str, &'static str, ProtectionLevel);

const CATALOG: &[CatalogEntry] = &[
    // Network
    ("android.permission.INTERNET", "NETWORK", ProtectionLevel::Normal),
    ("android.permission.ACCESS_NETWORK_STATE", "NETWORK", ProtectionLevel::Normal),
    ("android.permission.ACCESS_WIFI_STATE", "NETWORK", ProtectionLevel::Normal),
    // Location
    ("android.permission.ACCESS_FINE_LOCATION", "LOCATION", ProtectionLevel::Dangerous),
    ("android.permission.ACCESS_COARSE_LOCATION", "LOCATION", ProtectionLevel::Dangerous),
    ("android.permission.ACCESS_BACKGROUND_LOCATION", "LOCATION", ProtectionLevel::Dangerous),
    // Camera and sensors
    ("android.permission.CAMERA", "CAMERA", ProtectionLevel::Dangerous),
    ("android.permission.RECORD_AUDIO", "MICROPHONE", ProtectionLevel::Dangerous),
    ("android.permission.BODY_SENSORS", "SENSORS", ProtectionLevel::Dangerous),
    // Storage
    ("android.permission.READ_EXTERNAL_STORAGE", "STORAGE", ProtectionLevel::Dangerous),
    ("android.permission.WRITE_EXTERNAL_STORAGE", "STORAGE", ProtectionLevel::Dangerous),
    ("android.permission.READ_MEDIA_IMAGES", "STORAGE", ProtectionLevel::Dangerous),
    ("android.permission.READ_MEDIA_VIDEO", "STORAGE", ProtectionLevel::Dangerous),
    ("android.permission.READ_MEDIA_AUDIO", "STORAGE", ProtectionLevel::Dangerous),
    // Contacts
    ("android.permission.READ_CONTACTS", "CONTACTS", ProtectionLevel::Dangerous),
    ("android.permission.WRITE_CONTACTS", "CONTACTS", ProtectionLevel::Dangerous),
    // Phone
    ("android.permission.READ_PHONE_STATE", "PHONE", ProtectionLevel::Dangerous),
    ("android.permission.CALL_PHONE", "PHONE", ProtectionLevel::Dangerous),
    ("android.permission.READ_CALL_LOG", "PHONE", ProtectionLevel::Dangerous),
    // SMS
    ("android.permission.SEND_SMS", "SMS", ProtectionLevel::Dangerous),
    ("android.permission.RECEIVE_SMS", "SMS", ProtectionLevel::Dangerous),
    ("android.permission.READ_SMS", "SMS", ProtectionLevel::Dangerous),
    // Calendar
    ("android.permission.READ_CALENDAR", "CALENDAR", ProtectionLevel::Dangerous),
    ("android.permission.WRITE_CALENDAR", "CALENDAR", ProtectionLevel::Dangerous),
    // System
    ("android.permission.VIBRATE", "SYSTEM", ProtectionLevel::Normal),
    ("android.permission.WAKE_LOCK", "SYSTEM", ProtectionLevel::Normal),
    ("android.permission.FOREGROUND_SERVICE", "SYSTEM", ProtectionLevel::Normal),
    ("android.permission.RECEIVE_BOOT_COMPLETED", "SYSTEM", ProtectionLevel::Normal),
    ("android.permission.POST_NOTIFICATIONS", "NOTIFICATIONS", ProtectionLevel::Dangerous),
];

/// Get the short name from a full permission string-name
/// (e.g. "android.permission.CAMERA" -> "CAMERA").
pub fn short_name(key: &str) -> &str {
    match key.rfind('.') {
        Some(index) => &key[index + 1..],
        None => key,
    }
}

fn lookup(key: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|(name, _, _)| *name == key)
}

/// Group label for a known permission key.
pub fn group_label(key: &str) -> Option<&'static str> {
    lookup(key).map(|(_, group, _)| *group)
}

/// Protection level for a known permission key.
pub fn protection_level(key: &str) -> Option<ProtectionLevel> {
    lookup(key).map(|(_, _, level)| *level)
}

/// Check if a permission requires a runtime request (API 23+).
/// Unknown keys are assumed to, so the request flow still runs.
pub fn requires_runtime_request(key: &str) -> bool {
    protection_level(key)
        .map(|level| level == ProtectionLevel::Dangerous)
        .unwrap_or(true)
}

/// All dangerous permissions in the catalog.
pub fn dangerous_permissions() -> impl Iterator<Item = &'static str> {
    CATALOG
        .iter()
        .filter(|(_, _, level)| *level == ProtectionLevel::Dangerous)
        .map(|(name, _, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("android.permission.CAMERA"), "CAMERA");
        assert_eq!(short_name("no_dots_here"), "no_dots_here");
    }

    #[test]
    fn test_group_label() {
        assert_eq!(group_label("android.permission.RECORD_AUDIO"), Some("MICROPHONE"));
        assert_eq!(group_label("com.example.CUSTOM"), None);
    }

    #[test]
    fn test_requires_runtime_request() {
        assert!(requires_runtime_request("android.permission.CAMERA"));
        assert!(!requires_runtime_request("android.permission.INTERNET"));
        // unknown keys go through the flow
        assert!(requires_runtime_request("com.example.CUSTOM"));
    }

    #[test]
    fn test_dangerous_permissions_are_all_dangerous() {
        for key in dangerous_permissions() {
            assert_eq!(protection_level(key), Some(ProtectionLevel::Dangerous));
        }
    }
}

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// One-shot message shown to the user after a redirect.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Cookie-safe encoding (base64url of the JSON form).
    pub fn to_cookie_value(&self) -> String {
        // a struct of an enum and a String always serializes
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let raw = URL_SAFE_NO_PAD.decode(value.as_bytes()).ok()?;
        serde_json::from_slice(&raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_has_no_reserved_characters() {
        let notice = Notice::error("Username already exists; try \"another\", please.");
        let value = notice.to_cookie_value();
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(Notice::from_cookie_value(&value), Some(notice));
    }

    #[test]
    fn garbage_cookie_is_ignored() {
        assert_eq!(Notice::from_cookie_value("not base64 !!"), None);
        assert_eq!(Notice::from_cookie_value(&URL_SAFE_NO_PAD.encode(b"{\"level\":1}")), None);
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_value(Notice::warning("w")).unwrap();
        assert_eq!(json["level"], "warning");
    }
}

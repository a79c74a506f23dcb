use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 單頁版面中的一個區塊，位置由渲染層量測
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub top: u32,
    pub height: u32,
}

impl Section {
    pub fn new(id: impl Into<String>, top: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// 半開區間 `[top, top + height)`
    pub fn contains(&self, position: u32) -> bool {
        let bottom = self.top.saturating_add(self.height);
        position >= self.top && position < bottom
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    pub scroll_y: u32,
    pub active_section_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFormInput {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

/// 欄位對應錯誤訊息；空的代表輸入有效
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: BTreeMap<FormField, String>,
}

impl ValidationResult {
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn clear_field(&mut self, field: FormField) {
        self.errors.remove(&field);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Transport(String),
    Timeout,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Transport(reason) => write!(f, "transport failure: {}", reason),
            FailureReason::Timeout => f.write_str("timed out"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed(FailureReason),
}

/// 單次送出時 transport 觀察到的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success,
    TransportFailure(String),
    Timeout,
}

/// 一次 `ContactForm::submit` 的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Sent,
    Invalid(ValidationResult),
    Failed(FailureReason),
    /// 另一筆送出中，或表單尚未 reset
    Busy,
}

/// 交給 relay 的內容：使用者欄位加上送出時間
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: String,
}

/// 試算表的一列：`[name, email, message, timestamp]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: String,
}

impl ContactRow {
    pub fn into_values(self) -> Vec<String> {
        vec![self.name, self.email, self.message, self.timestamp]
    }
}

/// RFC 3339 UTC，毫秒精度，`Z` 結尾
pub fn iso_timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_section_range_is_half_open() {
        let section = Section::new("about", 100, 50);
        assert!(!section.contains(99));
        assert!(section.contains(100));
        assert!(section.contains(149));
        assert!(!section.contains(150));
    }

    #[test]
    fn test_iso_timestamp_matches_js_shape() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
        assert_eq!(iso_timestamp(at), "2024-05-01T12:30:05.000Z");
    }

    #[test]
    fn test_form_input_field_access() {
        let mut input = ContactFormInput::default();
        assert!(input.is_empty());
        input.set(FormField::Email, "a@b.co");
        assert_eq!(input.get(FormField::Email), "a@b.co");
        assert!(!input.is_empty());
    }
}

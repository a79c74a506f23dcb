use crate::domain::model::{ContactFormInput, FormField, ValidationResult};
use regex::Regex;
use std::sync::OnceLock;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email is invalid";
pub const MESSAGE_REQUIRED: &str = "Message is required";

fn email_shape() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // 未錨定：只要含有 `a@b.c` 形狀的子字串就通過
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

pub fn is_plausible_email(value: &str) -> bool {
    email_shape().is_match(value)
}

pub fn validate(input: &ContactFormInput) -> ValidationResult {
    let mut result = ValidationResult::default();

    if input.name.trim().is_empty() {
        result.insert(FormField::Name, NAME_REQUIRED);
    }

    if input.email.trim().is_empty() {
        result.insert(FormField::Email, EMAIL_REQUIRED);
    } else if !is_plausible_email(&input.email) {
        result.insert(FormField::Email, EMAIL_INVALID);
    }

    if input.message.trim().is_empty() {
        result.insert(FormField::Message, MESSAGE_REQUIRED);
    }

    result
}

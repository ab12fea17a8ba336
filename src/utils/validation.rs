use crate::utils::error::{CountdownError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("label pattern is valid"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// 驗證倒數標籤：只允許英數字、`-` 與 `_`，因為標籤會組成 `{label}-days` 之類的鍵
pub fn validate_label(field_name: &str, label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(CountdownError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: label.to_string(),
            reason: "Label cannot be empty".to_string(),
        });
    }

    if !label_pattern().is_match(label) {
        return Err(CountdownError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: label.to_string(),
            reason: "Label may only contain ASCII letters, digits, '-' and '_'".to_string(),
        });
    }

    Ok(())
}

pub fn validate_unique_labels<'a, I>(field_name: &str, labels: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label) {
            return Err(CountdownError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: label.to_string(),
                reason: "Duplicate countdown label".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CountdownError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CountdownError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 報名表單的寬鬆檢查：something@something.tld，不含空白
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

//! Input validation utilities
//!
//! Custom validators for `validator` derives on request DTOs.

use std::borrow::Cow;

use validator::ValidationError;

use crate::{
    constants::{self, MAX_TEST_CASES},
    models::TestCase,
};

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Validate a language identifier
pub fn validate_language(language: &str) -> Result<(), ValidationError> {
    let normalized = language.trim().to_ascii_lowercase();
    let known = constants::languages::ALL.contains(&normalized.as_str())
        || matches!(normalized.as_str(), "js" | "node" | "py" | "python3");
    if known {
        Ok(())
    } else {
        Err(error("language", "Unsupported language"))
    }
}

/// Validate a difficulty label
pub fn validate_difficulty(difficulty: &str) -> Result<(), ValidationError> {
    if constants::difficulties::ALL.contains(&difficulty.trim().to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(error("difficulty", "Difficulty must be easy, medium or hard"))
    }
}

/// Validate a test case list
pub fn validate_test_cases(cases: &[TestCase]) -> Result<(), ValidationError> {
    if cases.is_empty() {
        return Err(error("test_cases", "At least one test case is required"));
    }
    if cases.len() > MAX_TEST_CASES {
        return Err(error("test_cases", "Too many test cases"));
    }
    Ok(())
}

/// Validate an entry point name
pub fn validate_entry_point(name: &str) -> Result<(), ValidationError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        Ok(())
    } else {
        Err(error("entry_point", "Entry point must be a plain identifier"))
    }
}

/// Validate a wallet address: 26 to 128 printable ASCII characters, no spaces
pub fn validate_wallet_address(address: &str) -> Result<(), ValidationError> {
    let len = address.len();
    if !(26..=128).contains(&len) {
        return Err(error("wallet_address", "Wallet address length is invalid"));
    }
    if !address.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(error(
            "wallet_address",
            "Wallet address may only contain letters, digits, '_' and '-'",
        ));
    }
    Ok(())
}

/// Validate tags
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > 20 {
        return Err(error("tags", "At most 20 tags are allowed"));
    }
    if tags.iter().any(|t| t.trim().is_empty() || t.len() > 50) {
        return Err(error("tags", "Tags must be 1 to 50 characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_language() {
        assert!(validate_language("javascript").is_ok());
        assert!(validate_language("Python").is_ok());
        assert!(validate_language("js").is_ok());
        assert!(validate_language("brainfuck").is_err());
    }

    #[test]
    fn test_validate_test_cases() {
        assert!(validate_test_cases(&[]).is_err());
        let case = TestCase {
            input: json!([1]),
            expected_output: Some(json!(1)),
            is_hidden: false,
        };
        assert!(validate_test_cases(&[case.clone()]).is_ok());
        assert!(validate_test_cases(&vec![case; MAX_TEST_CASES + 1]).is_err());
    }

    #[test]
    fn test_validate_entry_point() {
        assert!(validate_entry_point("twoSum").is_ok());
        assert!(validate_entry_point("_solve").is_ok());
        assert!(validate_entry_point("1abc").is_err());
        assert!(validate_entry_point("f()").is_err());
    }

    #[test]
    fn test_validate_wallet_address() {
        assert!(validate_wallet_address("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU").is_ok());
        assert!(validate_wallet_address("short").is_err());
        assert!(validate_wallet_address("7xKXtg2CW87d97TXJSDpbD5jBkheTqA8 TZRuJosgAsU").is_err());
    }

    #[test]
    fn test_validate_misc() {
        assert!(validate_difficulty("hard").is_ok());
        assert!(validate_difficulty("impossible").is_err());
        assert!(validate_tags(&["arrays".to_string()]).is_ok());
        assert!(validate_tags(&[" ".to_string()]).is_err());
    }
}

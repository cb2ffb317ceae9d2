//! Language-specific harness generation and interpreter settings

pub mod javascript;
pub mod python;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    constants::{self, HARNESS_RESULT_MARKER},
    error::{AppError, AppResult},
};

/// Languages a submission can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
}

impl Language {
    /// Parse a language identifier, accepting the usual short forms
    pub fn parse(language: &str) -> AppResult<Self> {
        match language.trim().to_ascii_lowercase().as_str() {
            constants::languages::JAVASCRIPT | "js" | "node" => Ok(Self::JavaScript),
            constants::languages::PYTHON | "py" | "python3" => Ok(Self::Python),
            other => Err(AppError::Validation(format!(
                "Unsupported language: {}. Supported languages: {:?}",
                other,
                constants::languages::ALL
            ))),
        }
    }

    /// Canonical identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => constants::languages::JAVASCRIPT,
            Self::Python => constants::languages::PYTHON,
        }
    }

    /// Docker image the program runs in
    pub fn container_image(&self) -> &'static str {
        match self {
            Self::JavaScript => constants::container_images::JAVASCRIPT,
            Self::Python => constants::container_images::PYTHON,
        }
    }

    /// File name the harness program is written to
    pub fn source_file(&self) -> &'static str {
        match self {
            Self::JavaScript => "main.js",
            Self::Python => "main.py",
        }
    }

    /// Interpreter invocation inside the container (program path appended)
    pub fn container_command(&self, memory_limit_mb: u64) -> Vec<String> {
        match self {
            Self::JavaScript => vec![
                "node".to_string(),
                format!("--max-old-space-size={}", memory_limit_mb.max(16)),
            ],
            Self::Python => vec!["python3".to_string(), "-I".to_string(), "-B".to_string()],
        }
    }

    /// Find the first function the submission defines
    pub fn detect_entry_point(&self, code: &str) -> Option<String> {
        match self {
            Self::JavaScript => javascript::detect_entry_point(code),
            Self::Python => python::detect_entry_point(code),
        }
    }

    /// Whether `name` can be spliced into a harness as an identifier
    pub fn is_valid_identifier(&self, name: &str) -> bool {
        let mut chars = name.chars();
        let extra = match self {
            Self::JavaScript => "$",
            Self::Python => "",
        };
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' || extra.contains(c) => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || extra.contains(c))
    }

    /// Build the program that calls `entry_point(*args)` and reports the result
    pub fn build_program(&self, code: &str, entry_point: &str, args: &[Value]) -> AppResult<String> {
        if !self.is_valid_identifier(entry_point) {
            return Err(AppError::Validation(format!(
                "Invalid entry point name: {}",
                entry_point
            )));
        }

        let args_json = serde_json::to_string(args)
            .map_err(|e| AppError::InvalidInput(format!("Test input is not valid JSON: {}", e)))?;

        let literals = HarnessLiterals {
            marker: json_string(HARNESS_RESULT_MARKER)?,
            source: json_string(code)?,
            entry: json_string(entry_point)?,
            args: json_string(&args_json)?,
        };

        Ok(match self {
            Self::JavaScript => javascript::harness(&literals),
            Self::Python => python::harness(&literals),
        })
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Values embedded into a harness as quoted string literals.
///
/// JSON string literals are valid string literals in both JavaScript and
/// Python, so user code never has to be escaped by hand.
pub struct HarnessLiterals {
    pub marker: String,
    pub source: String,
    pub entry: String,
    pub args: String,
}

impl HarnessLiterals {
    /// Substitute `@MARKER@`, `@SOURCE@`, `@ENTRY@` and `@ARGS@` in one pass.
    ///
    /// Only the template is scanned, so placeholder text inside user code is
    /// never expanded.
    pub fn render(&self, template: &str) -> String {
        const KEYS: [&str; 4] = ["@MARKER@", "@SOURCE@", "@ENTRY@", "@ARGS@"];

        let mut out = String::with_capacity(template.len() + self.source.len() + self.args.len());
        let mut rest = template;

        while let Some((idx, key)) = KEYS
            .iter()
            .filter_map(|key| rest.find(key).map(|idx| (idx, *key)))
            .min_by_key(|(idx, _)| *idx)
        {
            out.push_str(&rest[..idx]);
            out.push_str(match key {
                "@MARKER@" => &self.marker,
                "@SOURCE@" => &self.source,
                "@ENTRY@" => &self.entry,
                _ => &self.args,
            });
            rest = &rest[idx + key.len()..];
        }

        out.push_str(rest);
        out
    }
}

fn json_string(s: &str) -> AppResult<String> {
    serde_json::to_string(s).map_err(|e| AppError::Internal(e.into()))
}

/// Verdict line written by a harness
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HarnessReport {
    Ok {
        #[serde(default)]
        value: Value,
    },
    SyntaxError {
        #[serde(default)]
        message: String,
    },
    RuntimeError {
        #[serde(default)]
        message: String,
    },
}

impl HarnessReport {
    /// Extract the last verdict line from captured stdout
    pub fn parse(stdout: &str) -> Option<Self> {
        stdout
            .lines()
            .rev()
            .find_map(|line| line.trim_end().strip_prefix(HARNESS_RESULT_MARKER))
            .and_then(|json| serde_json::from_str(json).ok())
    }
}

/// Spread a test case input into positional arguments
pub fn arguments_for(input: &Value) -> Vec<Value> {
    match input {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_language() {
        assert_eq!(Language::parse("javascript").unwrap(), Language::JavaScript);
        assert_eq!(Language::parse("JS").unwrap(), Language::JavaScript);
        assert_eq!(Language::parse("python3").unwrap(), Language::Python);
        assert!(Language::parse("cobol").is_err());
    }

    #[test]
    fn test_arguments_for() {
        assert_eq!(arguments_for(&json!([1, 2])), vec![json!(1), json!(2)]);
        assert_eq!(arguments_for(&json!("abc")), vec![json!("abc")]);
        assert_eq!(arguments_for(&json!([[3, 1, 2]])), vec![json!([3, 1, 2])]);
    }

    #[test]
    fn test_report_parsing_uses_last_marker() {
        let stdout = format!(
            "debug line\n{m}{{\"status\":\"ok\",\"value\":1}}\n{m}{{\"status\":\"ok\",\"value\":[1,2]}}\n",
            m = HARNESS_RESULT_MARKER
        );
        assert_eq!(
            HarnessReport::parse(&stdout),
            Some(HarnessReport::Ok { value: json!([1, 2]) })
        );
    }

    #[test]
    fn test_report_missing_value_is_null() {
        let stdout = format!("{}{{\"status\":\"ok\"}}", HARNESS_RESULT_MARKER);
        assert_eq!(
            HarnessReport::parse(&stdout),
            Some(HarnessReport::Ok { value: Value::Null })
        );
        assert_eq!(HarnessReport::parse("no marker here"), None);
    }

    #[test]
    fn test_identifier_validation() {
        assert!(Language::JavaScript.is_valid_identifier("$add_2"));
        assert!(!Language::Python.is_valid_identifier("$add"));
        assert!(!Language::JavaScript.is_valid_identifier("a; process.exit()"));
        assert!(Language::JavaScript
            .build_program("function f(){}", "f()", &[])
            .is_err());
    }

    #[test]
    fn test_render_does_not_expand_user_text() {
        let literals = HarnessLiterals {
            marker: "\"M\"".to_string(),
            source: "\"@ARGS@\"".to_string(),
            entry: "\"f\"".to_string(),
            args: "\"[1]\"".to_string(),
        };
        assert_eq!(
            literals.render("s=@SOURCE@;a=@ARGS@;m=@MARKER@"),
            "s=\"@ARGS@\";a=\"[1]\";m=\"M\""
        );
    }

    #[test]
    fn test_program_embeds_code_as_literal() {
        let code = "function add(a, b) { return a + \"\\n\"; }";
        let program = Language::JavaScript
            .build_program(code, "add", &[json!(1), json!(2)])
            .unwrap();
        assert!(program.contains(&serde_json::to_string(code).unwrap()));
        assert!(program.contains(HARNESS_RESULT_MARKER));
    }
}

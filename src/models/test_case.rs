//! Test case model
//!
//! Test cases are stored inline on their ticket as a JSON array; their
//! position in that array is their order.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::judge::JudgeCase;

/// One test case of a ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Any JSON value; arrays are spread as positional arguments
    pub input: Value,
    /// Absent when the ticket's reference solution computes it
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_output: Option<Value>,
    #[serde(default)]
    pub is_hidden: bool,
}

/// A present `null` is an expected value, only a missing field is `None`
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl From<&TestCase> for JudgeCase {
    fn from(case: &TestCase) -> Self {
        JudgeCase {
            input: case.input.clone(),
            expected: case.expected_output.clone(),
            hidden: case.is_hidden,
        }
    }
}

//! Review comment records parsed from model responses.

use serde::{Deserialize, Deserializer, Serialize};

/// One code-review comment from the model's JSON reply.
///
/// Every field defaults when absent so that a partially filled object
/// still produces a report row rather than failing the batch. The label
/// taxonomy (Readability, Design and Maintainability, Performance,
/// Defect, Other) lives in the prompt; the model's choice is carried
/// through as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewComment {
    /// Relative path of the file the comment applies to.
    #[serde(default)]
    pub filename: String,
    /// Changed line the comment refers to (target-side numbering).
    #[serde(default, deserialize_with = "lenient_line_number")]
    pub code_line: Option<u32>,
    /// The review comment text.
    #[serde(default)]
    pub comment: String,
    /// Category from the prompt taxonomy.
    #[serde(default)]
    pub label: String,
    /// Subcategory associated with the chosen category.
    #[serde(default)]
    pub label_justification: String,
}

impl ReviewComment {
    /// The line number rendered for the report, empty when absent.
    pub fn code_line_field(&self) -> String {
        self.code_line.map(|n| n.to_string()).unwrap_or_default()
    }
}

/// Deserialize a line number that models return as a JSON number or a
/// numeric string. Anything else maps to `None` rather than failing.
fn lenient_line_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

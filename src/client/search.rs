//! Interpreting the model's note ranking.

use std::collections::HashSet;

use schemars::{JsonSchema, schema_for};
use serde_json::Value;

use crate::core::{LlmError, ResponseFormat, SearchResult, SearchableItem};

/// Shape the model is asked to produce.
///
/// Only used to generate the schema hint; parsing is done leniently by
/// [`parse_selection`].
#[allow(dead_code)]
#[derive(JsonSchema)]
struct NoteRanking {
    /// Short explanation of why the selected notes match the query.
    reasoning: String,
    /// Indices of the matching notes, most relevant first.
    results: Vec<u32>,
}

pub(crate) fn response_format() -> ResponseFormat {
    ResponseFormat::JsonSchema {
        name: "note_ranking".to_string(),
        schema: schema_for!(NoteRanking).to_value(),
    }
}

/// The parsed ranking. Absent fields are `None`/empty here; placeholders are
/// applied by the caller.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Selection {
    pub reasoning: Option<String>,
    /// Entries that are non-negative integers, in model order.
    pub indices: Vec<u64>,
}

/// Parse the completion text.
///
/// Absent or `null` fields are accepted. A field that is present with the
/// wrong type, a non-object document, or text that is not JSON at all is an
/// [`LlmError::UpstreamResponse`]. Array entries that are not non-negative
/// integers are dropped.
pub(crate) fn parse_selection(
    operation: &'static str,
    text: &str,
) -> Result<Selection, LlmError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|e| {
        LlmError::upstream_response(operation, format!("response is not valid JSON: {e}"), text)
    })?;

    let Value::Object(object) = value else {
        return Err(LlmError::upstream_response(
            operation,
            "expected a JSON object",
            text,
        ));
    };

    let reasoning = match object.get("reasoning") {
        None | Some(Value::Null) => None,
        Some(Value::String(reasoning)) => Some(reasoning.clone()),
        Some(_) => {
            return Err(LlmError::upstream_response(
                operation,
                "`reasoning` must be a string",
                text,
            ));
        }
    };

    let indices = match object.get("results") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries.iter().filter_map(Value::as_u64).collect(),
        Some(_) => {
            return Err(LlmError::upstream_response(
                operation,
                "`results` must be an array",
                text,
            ));
        }
    };

    Ok(Selection { reasoning, indices })
}

/// Map indices back to `notes`, keeping model order.
///
/// Out-of-range indices are dropped, a repeated index keeps its first
/// position, and the result holds at most `limit` items.
pub(crate) fn resolve_indices(
    indices: &[u64],
    notes: &[SearchableItem],
    limit: usize,
) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    indices
        .iter()
        .filter_map(|&index| usize::try_from(index).ok())
        .filter(|&index| seen.insert(index))
        .filter_map(|index| notes.get(index).cloned())
        .take(limit)
        .collect()
}

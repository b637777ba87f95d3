// Defensive validation of model output. The model is asked for bare JSON
// but regularly wraps it in prose or markdown fences, so the design path
// slices the outermost array out of the raw text before parsing. Validation
// is all-or-nothing: one bad element fails the whole batch.

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    DEFAULT_STYLE, DESIGN_CONCEPT_COUNT, PITCH_CONCEPT_MAX, PITCH_CONCEPT_MIN,
    PITCH_CONCEPT_TARGET, PLACEHOLDER_IMAGE,
};
use crate::models::{Concept, PitchConcept};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("no usable JSON found in model response")]
    MalformedResponse,
    #[error("expected {expected} concepts, model returned {actual}")]
    CountMismatch { expected: usize, actual: usize },
    #[error("concept {index} is missing a usable `{field}` field")]
    InvalidConceptShape { index: usize, field: &'static str },
}

#[derive(Deserialize)]
struct RawDesignConcept {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    style: Option<String>,
}

#[derive(Deserialize)]
struct RawPitchConcept {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    headline: String,
}

/// Slice the outermost JSON array out of surrounding prose. Fails when
/// either bracket is missing or they are out of order.
pub fn extract_json_array(raw: &str) -> Result<&str, ParseError> {
    let start = raw.find('[').ok_or(ParseError::MalformedResponse)?;
    let end = raw.rfind(']').ok_or(ParseError::MalformedResponse)?;
    if end < start {
        return Err(ParseError::MalformedResponse);
    }
    Ok(&raw[start..=end])
}

/// Normalize raw chat output into exactly four design concepts. Fields are
/// trimmed; `style` falls back to the element's own value, then the
/// requested style, then the default; `image` starts as the placeholder
/// until the image step runs.
pub fn parse_design_concepts(
    raw: &str,
    requested_style: Option<&str>,
) -> Result<Vec<Concept>, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::EmptyResponse);
    }

    let sliced = extract_json_array(raw)?;
    let parsed: Vec<RawDesignConcept> =
        serde_json::from_str(sliced).map_err(|_| ParseError::MalformedResponse)?;

    if parsed.len() != DESIGN_CONCEPT_COUNT {
        return Err(ParseError::CountMismatch {
            expected: DESIGN_CONCEPT_COUNT,
            actual: parsed.len(),
        });
    }

    let mut concepts = Vec::with_capacity(parsed.len());
    for (index, raw_concept) in parsed.into_iter().enumerate() {
        let title = require_field(&raw_concept.title, index, "title")?;
        let description = require_field(&raw_concept.description, index, "description")?;
        let style = raw_concept
            .style
            .as_deref()
            .map(str::trim)
            .filter(|style| !style.is_empty())
            .or(requested_style)
            .unwrap_or(DEFAULT_STYLE)
            .to_string();

        concepts.push(Concept {
            title,
            description,
            style,
            image: PLACEHOLDER_IMAGE.to_string(),
        });
    }
    Ok(concepts)
}

/// Normalize raw chat output into a pitch pack. Accepts either a bare JSON
/// array or an object carrying a `concepts` array (the json_object hint
/// produces the latter); the entry count must stay inside the accepted band.
pub fn parse_pitch_concepts(raw: &str) -> Result<Vec<PitchConcept>, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::EmptyResponse);
    }

    // json_object mode should hand back a bare object, but fall back to the
    // array-slice path when the model wraps the payload in prose anyway.
    let value: serde_json::Value = match serde_json::from_str(raw.trim()) {
        Ok(value) => value,
        Err(_) => serde_json::from_str(extract_json_array(raw)?)
            .map_err(|_| ParseError::MalformedResponse)?,
    };

    let entries = match &value {
        serde_json::Value::Array(entries) => entries.as_slice(),
        serde_json::Value::Object(map) => map
            .get("concepts")
            .and_then(serde_json::Value::as_array)
            .ok_or(ParseError::MalformedResponse)?
            .as_slice(),
        _ => return Err(ParseError::MalformedResponse),
    };

    if entries.len() < PITCH_CONCEPT_MIN || entries.len() > PITCH_CONCEPT_MAX {
        return Err(ParseError::CountMismatch {
            expected: PITCH_CONCEPT_TARGET,
            actual: entries.len(),
        });
    }

    let mut concepts = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let raw_concept: RawPitchConcept =
            serde_json::from_value(entry.clone()).map_err(|_| ParseError::MalformedResponse)?;
        concepts.push(PitchConcept {
            title: require_field(&raw_concept.title, index, "title")?,
            description: require_field(&raw_concept.description, index, "description")?,
            headline: require_field(&raw_concept.headline, index, "headline")?,
        });
    }
    Ok(concepts)
}

fn require_field(value: &str, index: usize, field: &'static str) -> Result<String, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidConceptShape { index, field });
    }
    Ok(trimmed.to_string())
}

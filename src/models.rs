use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated design idea. Built per request, immutable once assembled,
/// never persisted anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub title: String,
    pub description: String,
    pub style: String,
    /// Hosted mockup URL, or a local placeholder path when no image exists.
    pub image: String,
}

/// One marketing pitch angle from the pitch-pack flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchConcept {
    pub title: String,
    pub description: String,
    pub headline: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single transcript entry in a chat session. The list is append-only and
/// scoped to one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of POST /api/chat. A missing prompt deserializes to an empty string
/// so the handler can reject it with a 400 instead of a decode error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub style: Option<String>,
}

/// Body of POST /api/generate-pitch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub tone: Option<String>,
}

/// Response of POST /api/chat. `error` carries an advisory message when the
/// concepts are the fallback batch; the status stays 200 either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptResponse {
    pub concepts: Vec<Concept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of POST /api/generate-pitch, same contract as ConceptResponse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchResponse {
    pub concepts: Vec<PitchConcept>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

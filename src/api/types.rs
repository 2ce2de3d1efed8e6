//! Wire types and errors for the element service.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use canvas::doc::{Element, ElementId, ElementKind, ProjectId};
use serde::{Deserialize, Serialize};

/// Name and slug used when no project exists yet.
pub const DEFAULT_PROJECT_NAME: &str = "My Project";
pub const DEFAULT_PROJECT_SLUG: &str = "default";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
    #[error("element service request failed: {0}")]
    Request(String),
    #[error("element service returned {status}: {body}")]
    Response { status: u16, body: String },
    #[error("element service response parse failed: {0}")]
    Parse(String),
}

impl ApiError {
    /// Whether the same call might succeed if tried again later.
    #[must_use]
    pub fn transient(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Response { status, .. } => *status == 429 || *status >= 500,
            Self::HttpClientBuild(_) | Self::Parse(_) => false,
        }
    }
}

// =============================================================================
// PROJECTS
// =============================================================================

/// The project a canvas session is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: ProjectId,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

impl From<Project> for ProjectRef {
    fn from(project: Project) -> Self {
        Self { id: project.id, slug: project.slug }
    }
}

#[derive(Debug, Serialize)]
pub struct NewProject<'a> {
    pub name: &'a str,
    pub slug: &'a str,
}

impl NewProject<'static> {
    #[must_use]
    pub fn default_project() -> Self {
        Self { name: DEFAULT_PROJECT_NAME, slug: DEFAULT_PROJECT_SLUG }
    }
}

// =============================================================================
// ELEMENTS
// =============================================================================

/// Body of `POST /api/elements`. Identity and completion are server-side.
#[derive(Debug, Serialize)]
pub struct NewElement<'a> {
    pub project_id: ProjectId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub content: &'a str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i64,
}

impl<'a> From<&'a Element> for NewElement<'a> {
    fn from(el: &'a Element) -> Self {
        Self {
            project_id: el.project_id,
            kind: el.kind,
            content: &el.content,
            x: el.x,
            y: el.y,
            width: el.width,
            height: el.height,
            z_index: el.z_index,
        }
    }
}

/// Body of a position-only `PUT /api/elements/{id}`.
#[derive(Debug, Serialize)]
pub struct PositionUpdate {
    pub x: f64,
    pub y: f64,
}

/// Body of a full `PUT /api/elements/{id}`: every mutable field.
#[derive(Debug, Serialize)]
pub struct ElementUpdate<'a> {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub content: &'a str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub completed: bool,
    pub z_index: i64,
}

impl<'a> From<&'a Element> for ElementUpdate<'a> {
    fn from(el: &'a Element) -> Self {
        Self {
            kind: el.kind,
            content: &el.content,
            x: el.x,
            y: el.y,
            width: el.width,
            height: el.height,
            completed: el.completed,
            z_index: el.z_index,
        }
    }
}

/// What the server answered to a create call.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedElement {
    #[serde(default)]
    pub id: ElementId,
}

/// Parse a JSON body, mapping failures to [`ApiError::Parse`].
///
/// # Errors
///
/// Returns [`ApiError::Parse`] when `body` is not valid JSON for `T`.
pub fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Parse a listing body. A JSON `null` is an empty listing.
///
/// # Errors
///
/// Returns [`ApiError::Parse`] when `body` is neither `null` nor an array of `T`.
pub fn parse_list<T: serde::de::DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    parse_body::<Option<Vec<T>>>(body).map(Option::unwrap_or_default)
}

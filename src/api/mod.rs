//! Element service boundary.
//!
//! The canvas talks to the backend through two narrow traits so the session
//! and sync layers can run against the HTTP client in production and against
//! an in-memory fake in tests.

pub mod http;
pub mod project;
pub mod types;

#[cfg(test)]
pub mod fake;

use canvas::doc::{Element, ElementId, ProjectId};
pub use types::{ApiError, ProjectRef};

/// Element CRUD against the backing service.
#[async_trait::async_trait]
pub trait ElementService: Send + Sync {
    /// All elements of a project.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    async fn list_elements(&self, project_id: ProjectId) -> Result<Vec<Element>, ApiError>;

    /// Persist a new element. Only the creation fields of `element` are sent;
    /// the returned element carries the server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    async fn create_element(&self, element: &Element) -> Result<Element, ApiError>;

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    async fn update_element_position(&self, id: ElementId, x: f64, y: f64) -> Result<(), ApiError>;

    /// Overwrite every mutable field of element `id` with those of `element`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    async fn update_element(&self, id: ElementId, element: &Element) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    async fn delete_element(&self, id: ElementId) -> Result<(), ApiError>;
}

/// Picks the project a session binds to.
#[async_trait::async_trait]
pub trait ProjectResolver: Send + Sync {
    /// The project matching `slug_hint`, else the first listed project, else a
    /// freshly created default project.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if listing fails, or if creating the default
    /// project fails.
    async fn resolve_or_create_default_project(&self, slug_hint: Option<&str>) -> Result<ProjectRef, ApiError>;
}

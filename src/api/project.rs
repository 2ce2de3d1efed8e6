//! Project resolution: which project a session binds to.

use super::types::{ApiError, NewProject, Project, ProjectRef};
use tracing::{info, warn};

/// Raw project listing and creation, as the service exposes them.
#[async_trait::async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Projects, optionally filtered by slug.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    async fn list_projects(&self, slug: Option<&str>) -> Result<Vec<Project>, ApiError>;

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    async fn create_project(&self, project: &NewProject<'_>) -> Result<Project, ApiError>;
}

/// The project matching `slug_hint`, else the first listed project, else a
/// newly created default project.
///
/// # Errors
///
/// Returns an [`ApiError`] if any listing fails, or if creating the default
/// project fails.
pub async fn resolve_or_create(dir: &dyn ProjectDirectory, slug_hint: Option<&str>) -> Result<ProjectRef, ApiError> {
    if let Some(slug) = slug_hint {
        if let Some(project) = dir.list_projects(Some(slug)).await?.into_iter().next() {
            return Ok(project.into());
        }
        warn!(slug, "no project with this slug; using the first project instead");
    }
    if let Some(project) = dir.list_projects(None).await?.into_iter().next() {
        return Ok(project.into());
    }

    let project = dir.create_project(&NewProject::default_project()).await?;
    info!(project_id = project.id, name = %project.name, slug = %project.slug, "created default project");
    Ok(project.into())
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;

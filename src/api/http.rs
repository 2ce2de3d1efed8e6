//! HTTP client for the element service's JSON REST API.
//!
//! Thin reqwest wrapper. URL construction and body parsing are pure
//! functions so they can be tested without a server.

use super::project::{resolve_or_create, ProjectDirectory};
use super::types::{
    parse_body, parse_list, ApiError, CreatedElement, ElementUpdate, NewElement, NewProject, PositionUpdate, Project,
    ProjectRef,
};
use super::{ElementService, ProjectResolver};
use crate::config::PortalConfig;
use canvas::doc::{Element, ElementId, ProjectId};
use std::time::Duration;
use tracing::debug;

pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the TLS backend cannot be initialized.
    pub fn new(config: &PortalConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
        check_status(status, text)
    }
}

#[async_trait::async_trait]
impl ElementService for HttpClient {
    async fn list_elements(&self, project_id: ProjectId) -> Result<Vec<Element>, ApiError> {
        let body = self.send(self.http.get(elements_url(&self.base_url, project_id))).await?;
        parse_list(&body)
    }

    async fn create_element(&self, element: &Element) -> Result<Element, ApiError> {
        let url = collection_url(&self.base_url, "elements");
        let body = self.send(self.http.post(url).json(&NewElement::from(element))).await?;
        let created: CreatedElement = parse_body(&body)?;
        debug!(id = created.id, kind = element.kind.as_str(), "element created remotely");
        Ok(Element { id: created.id, ..element.clone() })
    }

    async fn update_element_position(&self, id: ElementId, x: f64, y: f64) -> Result<(), ApiError> {
        let url = element_url(&self.base_url, id);
        self.send(self.http.put(url).json(&PositionUpdate { x, y })).await?;
        Ok(())
    }

    async fn update_element(&self, id: ElementId, element: &Element) -> Result<(), ApiError> {
        let url = element_url(&self.base_url, id);
        self.send(self.http.put(url).json(&ElementUpdate::from(element))).await?;
        Ok(())
    }

    async fn delete_element(&self, id: ElementId) -> Result<(), ApiError> {
        self.send(self.http.delete(element_url(&self.base_url, id))).await?;
        Ok(())
    }
}

impl HttpClient {
    fn projects_request(&self, slug: Option<&str>) -> reqwest::RequestBuilder {
        let request = self.http.get(collection_url(&self.base_url, "projects"));
        match slug {
            Some(slug) => request.query(&[("slug", slug)]),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl ProjectDirectory for HttpClient {
    async fn list_projects(&self, slug: Option<&str>) -> Result<Vec<Project>, ApiError> {
        let body = self.send(self.projects_request(slug)).await?;
        parse_list(&body)
    }

    async fn create_project(&self, project: &NewProject<'_>) -> Result<Project, ApiError> {
        let url = collection_url(&self.base_url, "projects");
        let body = self.send(self.http.post(url).json(project)).await?;
        parse_body(&body)
    }
}

#[async_trait::async_trait]
impl ProjectResolver for HttpClient {
    async fn resolve_or_create_default_project(&self, slug_hint: Option<&str>) -> Result<ProjectRef, ApiError> {
        resolve_or_create(self, slug_hint).await
    }
}

// =============================================================================
// PURE HELPERS
// =============================================================================

fn check_status(status: u16, body: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) { Ok(body) } else { Err(ApiError::Response { status, body }) }
}

fn collection_url(base: &str, collection: &str) -> String {
    format!("{base}/api/{collection}")
}

fn elements_url(base: &str, project_id: ProjectId) -> String {
    format!("{base}/api/elements?project_id={project_id}")
}

fn element_url(base: &str, id: ElementId) -> String {
    format!("{base}/api/elements/{id}")
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

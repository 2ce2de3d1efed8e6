//! In-memory element service for tests. Records every call.

use super::{ApiError, ElementService, ProjectRef, ProjectResolver};
use canvas::doc::{Element, ElementId, ProjectId};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ResolveProject(Option<String>),
    List(ProjectId),
    Create(Element),
    Position(ElementId, f64, f64),
    Update(ElementId, Element),
    Delete(ElementId),
}

pub struct FakeService {
    pub project: ProjectRef,
    pub elements: Vec<Element>,
    pub calls: Mutex<Vec<Call>>,
    next_id: AtomicI64,
    /// When set, `create_element` answers with this id instead of a fresh one.
    pub created_id_override: Option<ElementId>,
    pub fail_creates: bool,
    pub fail_updates: bool,
    pub fail_listing: bool,
    /// When set, `create_element` waits for a notification before answering.
    pub create_gate: Option<Notify>,
}

impl FakeService {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            project: ProjectRef { id: 1, slug: "default".into() },
            elements,
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(100),
            created_id_override: None,
            fail_creates: false,
            fail_updates: false,
            fail_listing: false,
            create_gate: None,
        }
    }

    pub fn gated(mut self) -> Self {
        self.create_gate = Some(Notify::new());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than project resolution and listing.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::ResolveProject(_) | Call::List(_)))
            .collect()
    }

    pub fn release_create(&self) {
        if let Some(gate) = &self.create_gate {
            gate.notify_one();
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn unavailable() -> ApiError {
        ApiError::Response { status: 503, body: "unavailable".into() }
    }
}

#[async_trait::async_trait]
impl ElementService for FakeService {
    async fn list_elements(&self, project_id: ProjectId) -> Result<Vec<Element>, ApiError> {
        self.record(Call::List(project_id));
        if self.fail_listing {
            return Err(Self::unavailable());
        }
        Ok(self.elements.clone())
    }

    async fn create_element(&self, element: &Element) -> Result<Element, ApiError> {
        self.record(Call::Create(element.clone()));
        if let Some(gate) = &self.create_gate {
            gate.notified().await;
        }
        if self.fail_creates {
            return Err(Self::unavailable());
        }
        let id = self.created_id_override.unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst));
        Ok(Element { id, ..element.clone() })
    }

    async fn update_element_position(&self, id: ElementId, x: f64, y: f64) -> Result<(), ApiError> {
        self.record(Call::Position(id, x, y));
        if self.fail_updates { Err(Self::unavailable()) } else { Ok(()) }
    }

    async fn update_element(&self, id: ElementId, element: &Element) -> Result<(), ApiError> {
        self.record(Call::Update(id, element.clone()));
        if self.fail_updates { Err(Self::unavailable()) } else { Ok(()) }
    }

    async fn delete_element(&self, id: ElementId) -> Result<(), ApiError> {
        self.record(Call::Delete(id));
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProjectResolver for FakeService {
    async fn resolve_or_create_default_project(&self, slug_hint: Option<&str>) -> Result<ProjectRef, ApiError> {
        self.record(Call::ResolveProject(slug_hint.map(str::to_string)));
        Ok(self.project.clone())
    }
}

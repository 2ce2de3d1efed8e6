//! One canvas session: the controller plus its sync plumbing.
//!
//! The session is the single writer of canvas state. Input events and create
//! completions are applied one at a time on the task that owns the session,
//! so the controller never sees concurrent mutation.

use crate::api::{ApiError, ElementService, ProjectRef, ProjectResolver};
use crate::sync::{SyncEvent, SyncGateway};
use canvas::controller::{Action, Controller};
use canvas::doc::SyncState;
use canvas::input::InputEvent;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct Session {
    project: ProjectRef,
    controller: Controller,
    gateway: SyncGateway,
    completions: mpsc::UnboundedReceiver<SyncEvent>,
    in_flight: Vec<JoinHandle<()>>,
}

impl Session {
    /// Resolve the project and load its elements.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the project cannot be resolved or its
    /// elements cannot be listed. No partial canvas is produced.
    pub async fn mount(
        resolver: &dyn ProjectResolver,
        service: Arc<dyn ElementService>,
        slug_hint: Option<&str>,
    ) -> Result<Self, ApiError> {
        let project = resolver.resolve_or_create_default_project(slug_hint).await?;
        let elements = service.list_elements(project.id).await?;
        info!(project_id = project.id, slug = %project.slug, elements = elements.len(), "canvas mounted");

        let mut controller = Controller::new(project.id);
        controller.load_snapshot(project.id, elements);
        let (tx, completions) = mpsc::unbounded_channel();
        Ok(Self { project, controller, gateway: SyncGateway::new(service, tx), completions, in_flight: Vec::new() })
    }

    pub fn project(&self) -> &ProjectRef {
        &self.project
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Apply one input event and start its remote calls.
    pub fn handle_input(&mut self, event: InputEvent) -> Vec<Action> {
        let actions = self.controller.handle(event);
        self.dispatch(&actions);
        actions
    }

    /// Apply one create completion.
    pub fn apply_sync(&mut self, event: SyncEvent) -> Vec<Action> {
        let actions = match event {
            SyncEvent::Created { index, key, id } => self.controller.apply_created(index, key, id),
            SyncEvent::CreateFailed { key } => self.controller.apply_create_failed(key),
        };
        self.dispatch(&actions);
        actions
    }

    fn dispatch(&mut self, actions: &[Action]) {
        self.in_flight.retain(|handle| !handle.is_finished());
        self.in_flight.extend(self.gateway.dispatch(actions));
    }

    /// Wait for every in-flight call, applying create completions as they
    /// land, until nothing is outstanding.
    pub async fn settle(&mut self) {
        loop {
            let handles = std::mem::take(&mut self.in_flight);
            if handles.is_empty() {
                break;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "sync task aborted");
                }
            }
            while let Ok(event) = self.completions.try_recv() {
                self.apply_sync(event);
            }
        }
    }

    /// Serialize input events and create completions until `inputs` closes,
    /// then settle outstanding calls and hand back the final controller.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<InputEvent>) -> Controller {
        loop {
            tokio::select! {
                event = inputs.recv() => match event {
                    Some(event) => {
                        self.handle_input(event);
                    }
                    None => break,
                },
                Some(event) = self.completions.recv() => {
                    self.apply_sync(event);
                }
            }
        }
        self.settle().await;

        let local_only = self.controller.store.entries().filter(|e| e.sync == SyncState::LocalOnly).count();
        info!(elements = self.controller.store.len(), local_only, "canvas session closed");
        self.controller
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

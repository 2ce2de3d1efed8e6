//! Fire-and-forget mirroring of durable canvas actions to the element service.
//!
//! Each durable [`Action`] becomes one spawned task. Nothing waits on them:
//! failures are logged and dropped, except for creates, whose outcome is
//! reported back to the session as a [`SyncEvent`] so the element can be
//! patched with its server id or marked local-only.

use crate::api::ElementService;
use canvas::controller::Action;
use canvas::doc::{ElementId, LocalKey};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Outcome of a create call, delivered back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// The element captured as `(index, key)` was assigned `id`.
    Created { index: usize, key: LocalKey, id: ElementId },
    CreateFailed { key: LocalKey },
}

pub struct SyncGateway {
    service: Arc<dyn ElementService>,
    events: mpsc::UnboundedSender<SyncEvent>,
}

impl SyncGateway {
    pub fn new(service: Arc<dyn ElementService>, events: mpsc::UnboundedSender<SyncEvent>) -> Self {
        Self { service, events }
    }

    /// Spawn one remote call per durable action, in order. Must be called
    /// from within a tokio runtime.
    pub fn dispatch(&self, actions: &[Action]) -> Vec<JoinHandle<()>> {
        actions.iter().filter_map(|action| self.spawn(action)).collect()
    }

    fn spawn(&self, action: &Action) -> Option<JoinHandle<()>> {
        let service = Arc::clone(&self.service);
        match action.clone() {
            Action::ElementCreated { index, key, element } => {
                let events = self.events.clone();
                Some(tokio::spawn(async move {
                    let event = match service.create_element(&element).await {
                        Ok(created) if created.id != 0 => {
                            debug!(id = created.id, index, "create acknowledged");
                            SyncEvent::Created { index, key, id: created.id }
                        }
                        Ok(_) => {
                            warn!(index, "create answered without an id; element stays local");
                            SyncEvent::CreateFailed { key }
                        }
                        Err(e) => {
                            error!(
                                error = %e,
                                transient = e.transient(),
                                index,
                                "create element failed; element stays local"
                            );
                            SyncEvent::CreateFailed { key }
                        }
                    };
                    if events.send(event).is_err() {
                        debug!(index, "session closed before create completed");
                    }
                }))
            }
            Action::ElementMoved { id, x, y } if id != 0 => Some(tokio::spawn(async move {
                if let Err(e) = service.update_element_position(id, x, y).await {
                    error!(error = %e, transient = e.transient(), id, "position update failed");
                }
            })),
            Action::ElementUpdated { id, element } if id != 0 => Some(tokio::spawn(async move {
                if let Err(e) = service.update_element(id, &element).await {
                    error!(error = %e, transient = e.transient(), id, "element update failed");
                }
            })),
            Action::ElementDeleted { id } if id != 0 => Some(tokio::spawn(async move {
                if let Err(e) = service.delete_element(id).await {
                    error!(error = %e, transient = e.transient(), id, "element delete failed");
                }
            })),
            Action::ElementMoved { .. } | Action::ElementUpdated { .. } | Action::ElementDeleted { .. } => {
                warn!(?action, "dropping durable action without a server id");
                None
            }
            Action::EditStarted { .. } | Action::SetCursor(_) | Action::RenderNeeded => None,
        }
    }
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;

//! # Document Actor
//!
//! The server half of the store. A `DocumentActor<T>` owns every document of type `T` and
//! processes [`DocumentRequest`]s one at a time, so the collection needs no locks and each
//! request observes the effects of all earlier ones.

use crate::client::DocumentClient;
use crate::entity::DocumentEntity;
use crate::error::StoreError;
use crate::message::DocumentRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns a collection of documents and serializes every access to it.
///
/// Create the actor and its client with [`DocumentActor::new`], then spawn
/// [`DocumentActor::run`] with the entity's context:
///
/// ```rust,ignore
/// let (actor, client) = DocumentActor::<PurchaseOrder>::new(64);
/// let handle = tokio::spawn(actor.run(()));
/// client.insert(order).await?;
/// ```
///
/// The actor stops once every client clone has been dropped.
pub struct DocumentActor<T: DocumentEntity> {
    receiver: mpsc::Receiver<DocumentRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: DocumentEntity> DocumentActor<T> {
    /// Creates the actor and a client connected to it.
    ///
    /// `buffer_size` bounds the request channel; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, DocumentClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, DocumentClient::new(sender))
    }

    fn allocate_id(&mut self) -> T::Id {
        loop {
            let id = T::Id::from(self.next_id);
            self.next_id += 1;
            if !self.store.contains_key(&id) {
                return id;
            }
        }
    }

    /// Processes requests until the channel closes.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Document actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                DocumentRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = self.allocate_id();
                    let result = match T::from_create_params(id.clone(), params) {
                        Ok(mut document) => match document.on_create(&context).await {
                            Ok(()) => {
                                self.store.insert(id.clone(), document);
                                info!(entity_type, %id, size = self.store.len(), "Created");
                                Ok(id)
                            }
                            Err(e) => {
                                warn!(entity_type, error = %e, "on_create failed");
                                Err(StoreError::EntityError(Box::new(e)))
                            }
                        },
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            Err(StoreError::EntityError(Box::new(e)))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                DocumentRequest::Insert {
                    document,
                    respond_to,
                } => {
                    let id = document.document_id();
                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Insert rejected, id taken");
                        let _ = respond_to.send(Err(StoreError::AlreadyExists(id.to_string())));
                        continue;
                    }
                    self.store.insert(id.clone(), document);
                    info!(entity_type, %id, size = self.store.len(), "Inserted");
                    let _ = respond_to.send(Ok(id));
                }
                DocumentRequest::Get { id, respond_to } => {
                    let document = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = document.is_some(), "Get");
                    let _ = respond_to.send(Ok(document));
                }
                DocumentRequest::Scan { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "Scan");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                DocumentRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(document) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    // Work on a copy so a failed hook leaves the stored document untouched.
                    let mut updated = document.clone();
                    let result = match updated.on_update(update, &context).await {
                        Ok(()) => {
                            *document = updated.clone();
                            info!(entity_type, %id, "Updated");
                            Ok(updated)
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            Err(StoreError::EntityError(Box::new(e)))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                DocumentRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(document) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = document.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                DocumentRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(document) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut updated = document.clone();
                    let result = match updated.handle_action(action, &context).await {
                        Ok(outcome) => {
                            *document = updated;
                            info!(entity_type, %id, "Action ok");
                            Ok(outcome)
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            Err(StoreError::EntityError(Box::new(e)))
                        }
                    };
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

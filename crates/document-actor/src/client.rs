//! # Document Client
//!
//! The cloneable handle used to talk to a [`DocumentActor`](crate::DocumentActor).

use crate::entity::DocumentEntity;
use crate::error::StoreError;
use crate::message::{DocumentRequest, Response};
use tokio::sync::{mpsc, oneshot};

/// Async, type-safe access to one document collection.
///
/// Holds only the request sender, so clones are cheap and can be shared across tasks.
pub struct DocumentClient<T: DocumentEntity> {
    sender: mpsc::Sender<DocumentRequest<T>>,
}

impl<T: DocumentEntity> Clone for DocumentClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: DocumentEntity> DocumentClient<T> {
    pub fn new(sender: mpsc::Sender<DocumentRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> DocumentRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, StoreError> {
        self.request(|respond_to| DocumentRequest::Create { params, respond_to })
            .await
    }

    pub async fn insert(&self, document: T) -> Result<T::Id, StoreError> {
        self.request(|respond_to| DocumentRequest::Insert {
            document,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| DocumentRequest::Get { id, respond_to })
            .await
    }

    pub async fn scan(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| DocumentRequest::Scan { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| DocumentRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| DocumentRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| DocumentRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

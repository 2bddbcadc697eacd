//! # Store Messages
//!
//! Requests sent from a [`DocumentClient`](crate::DocumentClient) to its
//! [`DocumentActor`](crate::DocumentActor). Every request carries a oneshot `respond_to` channel.

use crate::entity::DocumentEntity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// One-shot reply channel used by every request.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Requests understood by a document actor.
///
/// - **Create**: build a document from a payload under a generated id.
/// - **Insert**: store a fully built document under its own id (seeding, imports).
/// - **Get**: clone one document.
/// - **Scan**: clone every document, ordered by id.
/// - **Update**: apply an update payload in place.
/// - **Delete**: remove a document.
/// - **Action**: run a domain action against one stored document.
#[derive(Debug)]
pub enum DocumentRequest<T: DocumentEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Insert {
        document: T,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Scan {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

//! # Mocking the Document Store
//!
//! [`MockClient<T>`] hands out a real [`DocumentClient<T>`] whose requests are answered from a
//! queue of scripted expectations instead of a running [`DocumentActor`](crate::DocumentActor).
//! Use it to test code that *uses* a store (domain clients, the sweep) without seeding documents,
//! and to inject failures that are awkward to produce with a real actor.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | scripted replies | real documents |
//! | Error injection | `return_err` | needs a failing entity |
//! | Use case | logic around the client | the entity and the actor |
//!
//! ```rust
//! use document_actor::mock::MockClient;
//! use document_actor::{DocumentEntity, StoreError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Doc { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("doc error")] struct DocError;
//!
//! #[async_trait]
//! impl DocumentEntity for Doc {
//!     type Id = u32; type Create = (); type Update = (); type Action = ();
//!     type ActionResult = (); type Context = (); type Error = DocError;
//!     fn from_create_params(id: u32, _: ()) -> Result<Self, DocError> { Ok(Self { id }) }
//!     fn document_id(&self) -> u32 { self.id }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), DocError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), DocError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Doc>::new();
//!     mock.expect_scan().return_ok(vec![Doc { id: 1 }]);
//!     mock.expect_get(7).return_err(StoreError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.scan().await.unwrap().len(), 1);
//!     assert!(matches!(client.get(7).await, Err(StoreError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! The lower-level [`create_mock_client`] returns the raw receiver for tests that want to
//! inspect each request and answer it by hand.

use crate::client::DocumentClient;
use crate::entity::DocumentEntity;
use crate::error::StoreError;
use crate::message::DocumentRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: DocumentEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Scan {
        response: Result<Vec<T>, StoreError>,
    },
    Insert {
        response: Result<T::Id, StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
}

impl<T: DocumentEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "get",
            Expectation::Scan { .. } => "scan",
            Expectation::Insert { .. } => "insert",
            Expectation::Action { .. } => "action",
        }
    }
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A store client answered from scripted expectations, in order.
///
/// A request that does not match the next expectation panics the mock task; the caller then sees
/// [`StoreError::ActorDropped`] and [`MockClient::verify`] reports the leftover expectations.
pub struct MockClient<T: DocumentEntity> {
    client: DocumentClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: DocumentEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DocumentEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<DocumentRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (
                        DocumentRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (DocumentRequest::Scan { respond_to }, Some(Expectation::Scan { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        DocumentRequest::Insert { respond_to, .. },
                        Some(Expectation::Insert { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        DocumentRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "action sent to unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (request, Some(expectation)) => {
                        panic!(
                            "expected a {} request, got {:?}",
                            expectation.name(),
                            request_name(&request)
                        );
                    }
                    (request, None) => {
                        panic!("unexpected {} request", request_name(&request));
                    }
                }
            }
        });

        Self {
            client: DocumentClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// The client to hand to the code under test.
    pub fn client(&self) -> DocumentClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Get { id, response }
        })
    }

    pub fn expect_scan(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Scan {
            response,
        })
    }

    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Insert {
            response,
        })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Action { id, response }
        })
    }

    /// Panics if any scripted expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap();
        if !remaining.is_empty() {
            let names: Vec<_> = remaining.iter().map(Expectation::name).collect();
            panic!("{} expectation(s) not met: {:?}", remaining.len(), names);
        }
    }
}

fn request_name<T: DocumentEntity>(request: &DocumentRequest<T>) -> &'static str {
    match request {
        DocumentRequest::Create { .. } => "create",
        DocumentRequest::Insert { .. } => "insert",
        DocumentRequest::Get { .. } => "get",
        DocumentRequest::Scan { .. } => "scan",
        DocumentRequest::Update { .. } => "update",
        DocumentRequest::Delete { .. } => "delete",
        DocumentRequest::Action { .. } => "action",
    }
}

/// Finishes an expectation with the reply the mock should send.
pub struct ExpectationBuilder<T: DocumentEntity, R> {
    expectations: Expectations<T>,
    build: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: DocumentEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Expectations<T>,
        build: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            build: Box::new(build),
        }
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.build)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Creates a client plus the receiving end of its channel, for hand-answered tests.
pub fn create_mock_client<T: DocumentEntity>(
    buffer_size: usize,
) -> (DocumentClient<T>, mpsc::Receiver<DocumentRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (DocumentClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a `Scan`.
pub async fn expect_scan<T: DocumentEntity>(
    receiver: &mut mpsc::Receiver<DocumentRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, StoreError>>> {
    match receiver.recv().await {
        Some(DocumentRequest::Scan { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an `Action`.
pub async fn expect_action<T: DocumentEntity>(
    receiver: &mut mpsc::Receiver<DocumentRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(DocumentRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

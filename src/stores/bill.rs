//! Defines the bill store trait.

use std::future::Future;

use crate::{bill::BillRecord, file::FormData};

/// The store rejected a request.
///
/// `message` is meant for the user, e.g. "Erreur 404".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    /// A human readable description of the failure.
    pub message: String,
}

impl StoreError {
    /// Create an error with the given message.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// What the store returns after a receipt is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBill {
    /// Where the store keeps the uploaded file.
    pub file_url: String,
    /// The ID of the bill record created for the upload.
    pub key: String,
}

/// Replaces the bill identified by `selector` with `data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// The bill serialized as JSON.
    pub data: String,
    /// The key returned by [BillStore::create].
    pub selector: String,
}

/// Handles the creation, update and retrieval of bills on the remote store.
///
/// The returned futures do not need to be `Send`; the controllers run on a
/// single thread.
pub trait BillStore {
    /// Upload a receipt and create the bill record it belongs to.
    ///
    /// `payload` holds the receipt under `file` and the owner's email under `email`.
    fn create(&self, payload: FormData) -> impl Future<Output = Result<CreatedBill, StoreError>>;

    /// Replace the bill record chosen by `request.selector`.
    fn update(&self, request: UpdateRequest) -> impl Future<Output = Result<(), StoreError>>;

    /// Retrieve all the bills.
    fn list(&self) -> impl Future<Output = Result<Vec<BillRecord>, StoreError>>;
}

impl<T: BillStore + ?Sized> BillStore for &T {
    fn create(&self, payload: FormData) -> impl Future<Output = Result<CreatedBill, StoreError>> {
        (**self).create(payload)
    }

    fn update(&self, request: UpdateRequest) -> impl Future<Output = Result<(), StoreError>> {
        (**self).update(request)
    }

    fn list(&self) -> impl Future<Output = Result<Vec<BillRecord>, StoreError>> {
        (**self).list()
    }
}

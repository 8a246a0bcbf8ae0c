//! Remote document store contract.
//!
//! A document is one file in a hosted repository, read and written whole.
//! Writes are conditioned on the [`VersionToken`] captured at read time.

mod encoding;
mod error;
mod http_mapping;
mod traits;
mod types;

pub use encoding::{decode_content, encode_content};
pub use error::{Result, StoreError};
pub use http_mapping::{error_message_from_body, status_to_store_error};
pub use traits::DocumentStore;
pub use types::{
    Credentials, RemoteDocument, RepoMetadata, VersionToken, WriteReceipt, WriteRequest,
};

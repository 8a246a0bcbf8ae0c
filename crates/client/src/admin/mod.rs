//! Admin editing workflow for remote JSON documents.
//!
//! An [`AdminSession`] owns the credential cache, the loaded document, the
//! edit buffer and the status log. Its methods take `&mut self`, so one
//! session never has two remote calls in flight.

mod credentials;
mod error;
mod session;
mod state;
mod status;

pub use credentials::CredentialCache;
pub use error::{AdminError, Result};
pub use session::{AdminSession, Backup, BufferCheck, LoadedDocument};
pub use state::AdminState;
pub use status::{StatusLevel, StatusLog, StatusMessage};

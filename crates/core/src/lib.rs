//! seminar_core - Functional core for the seminar schedule.
//!
//! Pure data types and functions shared by the client and the CLI: the talk
//! record model and its validation, the schedule filter/sort engine, edit
//! buffer operations, submission form rules, calendar export, and the remote
//! document store contract. Nothing in this crate performs I/O.

pub mod calendar;
pub mod document;
pub mod event;
pub mod serde;
pub mod settings;
pub mod submission;

//! # j2p-core
//!
//! Field mapping and reference reconciliation for jira2plane.
//!
//! This crate holds everything between a parsed CSV row and a Plane API call:
//! - Name normalization and tag splitting
//! - Priority and status mapping tables
//! - Reference resolution (ensure-or-create for labels and workflow states)
//! - Project reference disambiguation
//! - Row-to-issue payload assembly
//! - The sequential row importer and its run summary
//!
//! Network access is abstracted behind [`api::WorkspaceApi`] and
//! [`api::ProjectApi`]; the HTTP implementation lives in `j2p-plane`.

pub mod api;
pub mod entities;
pub mod errors;
pub mod import;
pub mod mapping;
pub mod normalize;
pub mod payload;
pub mod project;
pub mod resolver;
pub mod row;

#[cfg(test)]
mod fake;

pub use errors::CoreError;

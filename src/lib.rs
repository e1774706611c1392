//! Librarium - library catalog core
//!
//! Domain library for the catalog web application. Provides the entity
//! models, the Postgres-backed entity store services, the relational
//! integrity layer that guards cross-entity references, composite query
//! assembly for the detail/list views, and input validation.
//!
//! The HTTP surface lives in the sibling `web-server` crate.

// Core error and validation handling
pub mod validation;

// Entity models and derived properties
pub mod models;

// Entity store, integrity rules and composite queries
pub mod database;

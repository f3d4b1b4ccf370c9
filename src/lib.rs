//! Data-access core of a property-management dashboard.
//!
//! The `data` feature builds the pure layer: domain records, the response
//! envelope, forms and the list pipeline. The default `client` feature adds
//! the HTTP repository, the query cache and the [`services::Dashboard`]
//! facade the screens use.

pub mod domain;
pub mod dto;
pub mod errors;
pub mod forms;
pub mod pagination;

#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod query;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod session;

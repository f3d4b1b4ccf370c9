//! DTOs exchanged with the property-management API.

pub mod envelope;
pub mod list;

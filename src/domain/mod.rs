//! Domain records shown on the dashboard screens and the payloads written back.

pub mod amenity;
pub mod document;
pub mod notice;
pub mod onboarding;
pub mod parking;
pub mod resident;
pub mod service_request;
pub mod staff;
pub mod types;
pub mod unit;

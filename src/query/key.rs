//! Canonical cache keys.

use std::collections::BTreeMap;
use std::fmt;

use crate::dto::list::ListParams;

/// Resource names used as the first half of every key.
pub mod keys {
    pub const STAFF: &str = "staff";
    pub const UNITS: &str = "units";
    pub const AMENITIES: &str = "amenities";
    pub const PARKING: &str = "parking";
    pub const RESIDENTS: &str = "residents";
    pub const NOTICES: &str = "notices";
    pub const SERVICE_REQUESTS: &str = "service_requests";
    pub const DOCUMENTS: &str = "documents";
    pub const ONBOARDING: &str = "onboarding";
}

/// Resource plus sorted parameters; two requests with the same
/// parameters in any order map to the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    resource: String,
    params: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Key of a list query; `scope = list` keeps lists apart from items.
    pub fn list(resource: &str, params: &ListParams) -> Self {
        params
            .to_query()
            .into_iter()
            .fold(Self::new(resource).param("scope", "list"), |key, (k, v)| {
                key.param(k, v)
            })
    }

    pub fn item(resource: &str, id: i64) -> Self {
        Self::new(resource).param("scope", "item").param("id", id)
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource)?;
        let mut sep = '?';
        for (name, value) in &self.params {
            write!(f, "{sep}{name}={value}")?;
            sep = '&';
        }
        Ok(())
    }
}

/// Selects cache entries for invalidation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyPattern {
    All,
    /// Every key of one resource.
    Resource(String),
    Exact(QueryKey),
    /// Keys of a resource whose parameter has the given value.
    Param {
        resource: String,
        name: String,
        value: String,
    },
}

impl KeyPattern {
    pub fn resource(resource: impl Into<String>) -> Self {
        KeyPattern::Resource(resource.into())
    }

    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            KeyPattern::All => true,
            KeyPattern::Resource(resource) => key.resource == *resource,
            KeyPattern::Exact(exact) => key == exact,
            KeyPattern::Param {
                resource,
                name,
                value,
            } => key.resource == *resource && key.get(name) == Some(value.as_str()),
        }
    }
}

//! Query cache, mutation tracking and invalidation.

pub mod cache;
pub mod invalidation;
pub mod key;
pub mod mutation;
pub mod scope;

pub use cache::{QueryCache, QueryState};
pub use invalidation::{InvalidationRegistry, MutationKind};
pub use key::{KeyPattern, QueryKey, keys};
pub use mutation::MutationHook;
pub use scope::ScreenScope;

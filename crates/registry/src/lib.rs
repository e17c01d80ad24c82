//! Tagged component registry with deterministic priority ordering.
//!
//! Components are declared once with an identity, a set of [`Role`]s and an
//! optional priority. [`OrderedChain::collect`] turns everything holding a role
//! into a sequence sorted by priority (lower first), ties kept in registration
//! order.

mod chain;
mod error;
mod id;
mod registry;
mod role;
mod sort;

pub use chain::OrderedChain;
pub use error::RegistryError;
pub use id::ComponentId;
pub use registry::{ComponentDecl, Registered, TagRegistry};
pub use role::Role;
pub use sort::sort_by_priority;

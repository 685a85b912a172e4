//! Caller roles and role resolution for station-roster.

pub mod resolver;
pub mod role;

pub use resolver::RoleResolver;
pub use role::Role;

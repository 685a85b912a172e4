//! Audit and direct notification fan-out for station-roster.

pub mod notifier;
pub mod report;

pub use notifier::Notifier;
pub use report::{Audience, Delivery, DeliveryReport};

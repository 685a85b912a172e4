//! Per-recipient outcomes of a notification fan-out.

use station_roster_core::ChatUserId;
use station_roster_transport::TransportError;

/// Who one delivery attempt targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// The shared audit channel.
    AuditChannel,
    /// One super admin's private chat, as audit fallback.
    SuperAdmin(ChatUserId),
    /// An ordinary user's private chat.
    User(ChatUserId),
}

/// One delivery attempt and how it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub audience: Audience,
    pub result: Result<(), TransportError>,
}

impl Delivery {
    #[must_use]
    pub fn delivered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Every delivery attempt made for one notification, in attempt order.
///
/// A failed attempt never aborts the fan-out, so callers inspect the
/// report instead of matching on an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub deliveries: Vec<Delivery>,
}

impl DeliveryReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, audience: Audience, result: Result<(), TransportError>) {
        self.deliveries.push(Delivery { audience, result });
    }

    /// True if at least one attempt succeeded.
    #[must_use]
    pub fn any_delivered(&self) -> bool {
        self.deliveries.iter().any(Delivery::delivered)
    }

    /// The attempts that failed.
    #[must_use]
    pub fn failures(&self) -> Vec<&Delivery> {
        self.deliveries.iter().filter(|d| !d.delivered()).collect()
    }
}

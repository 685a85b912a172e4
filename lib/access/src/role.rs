//! Caller roles for command dispatch.
//!
//! Every inbound event is resolved to exactly one role before any handler
//! runs. There is no role hierarchy: a super admin manages heads, a head
//! manages one station's workers, and the two command sets do not overlap.

use station_roster_core::StationId;

/// What the caller of an inbound event is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full administrative access, granted by configuration.
    SuperAdmin,
    /// Roster access scoped to the one station the caller heads.
    StationHead(StationId),
    /// No recognized access.
    Anonymous,
}

impl Role {
    /// Returns true if this role has super admin privileges.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// The station this role manages, if it is a station head.
    #[must_use]
    pub fn managed_station(&self) -> Option<StationId> {
        match self {
            Self::StationHead(station) => Some(*station),
            _ => None,
        }
    }
}

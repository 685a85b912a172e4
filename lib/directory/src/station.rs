//! Stations and the station-head assignments tied to them.

use serde::{Deserialize, Serialize};
use station_roster_core::{ChatUserId, StationId};

/// A metro station workers are rostered at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

/// A station head: a platform user entrusted with one station's roster.
///
/// Each user heads at most one station; reassigning moves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationHead {
    pub user: ChatUserId,
    pub station: StationId,
}

/// A station head joined with the station they manage, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadAssignment {
    pub user: ChatUserId,
    pub station: Station,
}

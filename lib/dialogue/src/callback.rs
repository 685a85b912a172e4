//! Inline keyboard callback payloads.
//!
//! Payloads are colon-separated tags with the ids baked in, so a tap is
//! self-describing even if the keyboard message outlives the session that
//! produced it. The dispatcher still cross-checks ids against the session
//! before acting.

use station_roster_core::{ChatUserId, StationId, WorkerId};
use station_roster_directory::{Position, Shift};

/// A decoded inline button tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Entrust a station to a head: `setstation:<head>:<station>`.
    AssignStation { head: ChatUserId, station: StationId },
    /// Move a worker to another station: `changestation:<worker>:<station>`.
    MoveWorker { worker: WorkerId, station: StationId },
    /// Change a worker's position: `setposition:<worker>:<label>`.
    SetPosition { worker: WorkerId, position: Position },
    /// Change a worker's shift: `setshift:<worker>:<number>`.
    SetShift { worker: WorkerId, shift: Shift },
}

impl CallbackAction {
    /// Encodes the action into button payload form.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::AssignStation { head, station } => format!("setstation:{head}:{station}"),
            Self::MoveWorker { worker, station } => format!("changestation:{worker}:{station}"),
            Self::SetPosition { worker, position } => format!("setposition:{worker}:{position}"),
            Self::SetShift { worker, shift } => format!("setshift:{worker}:{shift}"),
        }
    }

    /// Decodes a button payload; `None` for anything malformed or unknown.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        let mut parts = data.splitn(3, ':');
        let tag = parts.next()?;
        let first = parts.next()?;
        let second = parts.next()?;

        match tag {
            "setstation" => Some(Self::AssignStation {
                head: first.parse().ok()?,
                station: second.parse().ok()?,
            }),
            "changestation" => Some(Self::MoveWorker {
                worker: first.parse().ok()?,
                station: second.parse().ok()?,
            }),
            "setposition" => Some(Self::SetPosition {
                worker: first.parse().ok()?,
                position: second.parse().ok()?,
            }),
            "setshift" => Some(Self::SetShift {
                worker: first.parse().ok()?,
                shift: second.parse().ok()?,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_station_roundtrip() {
        let action = CallbackAction::AssignStation {
            head: ChatUserId::new(123_456_789),
            station: StationId::new(12),
        };
        let encoded = action.encode();
        assert_eq!(encoded, "setstation:123456789:12");
        assert_eq!(CallbackAction::parse(&encoded), Some(action));
    }

    #[test]
    fn position_label_survives_roundtrip() {
        let action = CallbackAction::SetPosition {
            worker: WorkerId::new(7),
            position: Position::Operator,
        };
        let encoded = action.encode();
        assert_eq!(encoded, "setposition:7:Оператор");
        assert_eq!(CallbackAction::parse(&encoded), Some(action));
    }

    #[test]
    fn move_worker_roundtrip() {
        let action = CallbackAction::MoveWorker {
            worker: WorkerId::new(31),
            station: StationId::new(4),
        };
        assert_eq!(action.encode(), "changestation:31:4");
        assert_eq!(CallbackAction::parse("changestation:31:4"), Some(action));
    }

    #[test]
    fn malformed_payloads_parse_to_none() {
        assert_eq!(CallbackAction::parse(""), None);
        assert_eq!(CallbackAction::parse("setstation:12"), None);
        assert_eq!(CallbackAction::parse("setstation:abc:1"), None);
        assert_eq!(CallbackAction::parse("setshift:1:9"), None);
        assert_eq!(CallbackAction::parse("setposition:1:Машинист"), None);
        assert_eq!(CallbackAction::parse("unknown:1:2"), None);
    }
}

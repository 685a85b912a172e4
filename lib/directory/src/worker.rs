//! Worker records and the values used to create and amend them.

use crate::position::{Position, Shift};
use serde::{Deserialize, Serialize};
use station_roster_core::{StationId, WorkerId};

/// A station worker on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    /// Station this worker is rostered at.
    pub station: StationId,
    /// Full name as entered by the operator.
    pub full_name: String,
    /// Five-digit personnel number, kept as text to preserve leading zeros.
    pub tabel: String,
    pub position: Position,
    pub shift: Shift,
    /// Platform file id of an uploaded photo, or an http(s) URL. Rows
    /// loaded from outside the bot may have none.
    pub photo: Option<String>,
}

/// The values needed to create a worker; the store assigns the id.
///
/// The photo is not optional here: the enrollment dialogue always collects
/// one before it commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerDraft {
    pub station: StationId,
    pub full_name: String,
    pub tabel: String,
    pub position: Position,
    pub shift: Shift,
    pub photo: String,
}

impl WorkerDraft {
    /// Builds the stored worker once the backend has assigned an id.
    #[must_use]
    pub fn into_worker(self, id: WorkerId) -> Worker {
        Worker {
            id,
            station: self.station,
            full_name: self.full_name,
            tabel: self.tabel,
            position: self.position,
            shift: self.shift,
            photo: Some(self.photo),
        }
    }
}

/// A single-field amendment to an existing worker.
///
/// Edits always change exactly one field; each change is committed on its
/// own so an interrupted editing session never leaves a half-applied record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerPatch {
    FullName(String),
    Tabel(String),
    Position(Position),
    Shift(Shift),
    Photo(String),
    Station(StationId),
}

impl WorkerPatch {
    /// The label of the amended field, as shown in prompts and audit notices.
    #[must_use]
    pub const fn field_label(&self) -> &'static str {
        match self {
            Self::FullName(_) => "F.I.O",
            Self::Tabel(_) => "Tabel",
            Self::Position(_) => "Lavozim",
            Self::Shift(_) => "Smena",
            Self::Photo(_) => "Rasm",
            Self::Station(_) => "Bekat",
        }
    }

    /// Applies this patch to a worker in place.
    pub fn apply(&self, worker: &mut Worker) {
        match self {
            Self::FullName(value) => worker.full_name = value.clone(),
            Self::Tabel(value) => worker.tabel = value.clone(),
            Self::Position(value) => worker.position = *value,
            Self::Shift(value) => worker.shift = *value,
            Self::Photo(value) => worker.photo = Some(value.clone()),
            Self::Station(value) => worker.station = *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_worker() -> Worker {
        Worker {
            id: WorkerId::new(3),
            station: StationId::new(1),
            full_name: "Karimov Aziz Baxtiyorovich".to_string(),
            tabel: "01000".to_string(),
            position: Position::Operator,
            shift: Shift::new(2).expect("valid shift"),
            photo: Some("AgACAgIAAxkBAAIB".to_string()),
        }
    }

    #[test]
    fn draft_keeps_every_field() {
        let draft = WorkerDraft {
            station: StationId::new(7),
            full_name: "Tosheva Nilufar Akmalovna".to_string(),
            tabel: "54321".to_string(),
            position: Position::Cashier,
            shift: Shift::new(1).expect("valid shift"),
            photo: "https://example.com/photo.jpg".to_string(),
        };

        let worker = draft.clone().into_worker(WorkerId::new(12));
        assert_eq!(worker.id, WorkerId::new(12));
        assert_eq!(worker.station, draft.station);
        assert_eq!(worker.tabel, "54321");
        assert_eq!(worker.photo.as_deref(), Some("https://example.com/photo.jpg"));
    }

    #[test]
    fn patch_changes_exactly_one_field() {
        let mut worker = sample_worker();
        let before = worker.clone();

        WorkerPatch::Shift(Shift::new(4).expect("valid shift")).apply(&mut worker);

        assert_eq!(worker.shift.get(), 4);
        assert_eq!(worker.full_name, before.full_name);
        assert_eq!(worker.tabel, before.tabel);
        assert_eq!(worker.position, before.position);
        assert_eq!(worker.photo, before.photo);
    }

    #[test]
    fn patch_moves_worker_between_stations() {
        let mut worker = sample_worker();
        WorkerPatch::Station(StationId::new(9)).apply(&mut worker);
        assert_eq!(worker.station, StationId::new(9));
    }

    #[test]
    fn patch_field_labels_are_distinct() {
        use std::collections::HashSet;

        let labels: HashSet<_> = [
            WorkerPatch::FullName(String::new()).field_label(),
            WorkerPatch::Tabel(String::new()).field_label(),
            WorkerPatch::Position(Position::Operator).field_label(),
            WorkerPatch::Shift(Shift::ALL[0]).field_label(),
            WorkerPatch::Photo(String::new()).field_label(),
            WorkerPatch::Station(StationId::new(1)).field_label(),
        ]
        .into_iter()
        .collect();
        assert_eq!(labels.len(), 6);
    }
}

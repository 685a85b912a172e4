//! Dialogue state machines.
//!
//! Each dialogue is a closed enumeration of states, and every state carries
//! the values collected so far. Transitions happen exactly once per inbound
//! event in the flow modules; an event that fits no transition re-prompts
//! and leaves the state untouched.

use station_roster_core::{ChatUserId, StationId, WorkerId};
use station_roster_directory::{Position, Shift};

/// One worker line in a numbered roster snapshot.
///
/// Numbered selection works against the snapshot taken when the list was
/// rendered, so later inserts cannot shift which worker a number means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSummary {
    pub id: WorkerId,
    pub full_name: String,
}

/// The worker enrollment dialogue: five fields collected in fixed order,
/// committed as one insert at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddWorkerState {
    AskFullName {
        station: StationId,
    },
    AskTabel {
        station: StationId,
        full_name: String,
    },
    AskPosition {
        station: StationId,
        full_name: String,
        tabel: String,
    },
    AskShift {
        station: StationId,
        full_name: String,
        tabel: String,
        position: Position,
    },
    AskPhoto {
        station: StationId,
        full_name: String,
        tabel: String,
        position: Position,
        shift: Shift,
    },
}

/// A worker field edited through free text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    FullName,
    Tabel,
    Photo,
}

impl TextField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "F.I.O",
            Self::Tabel => "Tabel",
            Self::Photo => "Rasm",
        }
    }
}

/// A worker field edited by picking from an inline option menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickField {
    Position,
    Shift,
    Station,
}

impl PickField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Position => "Lavozim",
            Self::Shift => "Smena",
            Self::Station => "Bekat",
        }
    }
}

/// The worker editing dialogue.
///
/// Every accepted change is committed immediately; `changed` accumulates
/// the labels of amended fields for the consolidated audit notice sent
/// when the user stops editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditWorkerState {
    PickWorker {
        roster: Vec<WorkerSummary>,
    },
    FieldMenu {
        worker: WorkerId,
        changed: Vec<&'static str>,
    },
    AwaitText {
        worker: WorkerId,
        field: TextField,
        changed: Vec<&'static str>,
    },
    AwaitPick {
        worker: WorkerId,
        field: PickField,
        changed: Vec<&'static str>,
    },
    AskEditMore {
        worker: WorkerId,
        changed: Vec<&'static str>,
    },
}

/// The browse dialogue: a rendered roster waiting for a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    pub roster: Vec<WorkerSummary>,
}

/// The head assignment dialogue (super admin only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignHeadState {
    AskHeadId,
    ChooseStation { head: ChatUserId },
}

/// The head removal dialogue (super admin only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveHeadState {
    AskHeadId,
}

/// Every dialogue a user can be in the middle of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialogue {
    AddWorker(AddWorkerState),
    EditWorker(EditWorkerState),
    BrowseWorkers(BrowseState),
    AssignHead(AssignHeadState),
    RemoveHead(RemoveHeadState),
}

impl Dialogue {
    /// A short tag naming the dialogue, for logs and error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddWorker(_) => "add_worker",
            Self::EditWorker(_) => "edit_worker",
            Self::BrowseWorkers(_) => "browse_workers",
            Self::AssignHead(_) => "assign_head",
            Self::RemoveHead(_) => "remove_head",
        }
    }
}

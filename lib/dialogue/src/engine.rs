//! The conversation engine.
//!
//! [`Engine`] owns the collaborators every dialogue step needs and advances
//! one dialogue by exactly one step per inbound event. The per-dialogue
//! step logic lives in the flow modules; this module holds the type, the
//! step dispatcher, and helpers shared across flows.

use crate::error::DialogueError;
use crate::state::{Dialogue, WorkerSummary};
use crate::texts;
use station_roster_core::{ChatId, StationId};
use station_roster_directory::{Directory, Worker};
use station_roster_notify::Notifier;
use station_roster_transport::{InboundEvent, Messenger};
use std::sync::Arc;
use tracing::warn;

/// Advances dialogues and runs role-gated commands.
pub(crate) struct Engine<D, M> {
    pub(crate) directory: Arc<D>,
    pub(crate) messenger: Arc<M>,
    pub(crate) notifier: Notifier<M>,
}

impl<D: Directory, M: Messenger> Engine<D, M> {
    pub(crate) fn new(directory: Arc<D>, messenger: Arc<M>, notifier: Notifier<M>) -> Self {
        Self {
            directory,
            messenger,
            notifier,
        }
    }

    /// Runs one dialogue step.
    ///
    /// `Ok(Some(next))` keeps the session alive in `next`; `Ok(None)` ends
    /// it. `Err` means the step could not complete and the caller decides
    /// what happens to the session.
    pub(crate) async fn advance(
        &self,
        event: &InboundEvent,
        dialogue: Dialogue,
    ) -> Result<Option<Dialogue>, DialogueError> {
        match dialogue {
            Dialogue::AddWorker(state) => self.add_worker_step(event, state).await,
            Dialogue::EditWorker(state) => self.edit_worker_step(event, state).await,
            Dialogue::BrowseWorkers(state) => self.browse_step(event, state).await,
            Dialogue::AssignHead(state) => self.assign_head_step(event, state).await,
            Dialogue::RemoveHead(state) => self.remove_head_step(event, state).await,
        }
    }

    /// The display name of a station, falling back to its number so a
    /// racing deletion cannot fail a step that only needs a label.
    pub(crate) async fn station_label(&self, id: StationId) -> String {
        match self.directory.station(id).await {
            Ok(Some(station)) => station.name,
            Ok(None) => format!("№{id}"),
            Err(error) => {
                warn!(%error, station = %id, "station lookup failed");
                format!("№{id}")
            }
        }
    }

    /// A station's roster reduced to numbered-list entries.
    pub(crate) async fn roster_summaries(
        &self,
        station: StationId,
    ) -> Result<Vec<WorkerSummary>, DialogueError> {
        let workers = self.directory.workers_by_station(station).await?;
        Ok(workers
            .into_iter()
            .map(|worker| WorkerSummary {
                id: worker.id,
                full_name: worker.full_name,
            })
            .collect())
    }

    /// Sends one worker's card: a photo with caption, or plain text when the
    /// record has no photo.
    pub(crate) async fn send_worker_card(
        &self,
        chat: ChatId,
        worker: &Worker,
    ) -> Result<(), DialogueError> {
        let station = self.station_label(worker.station).await;
        let card = texts::worker_card(worker, &station);
        match &worker.photo {
            Some(photo) => self.messenger.send_photo(chat, photo, Some(&card)).await?,
            None => self.messenger.send_text(chat, &card).await?,
        }
        Ok(())
    }
}

//! Roster browsing: a station head lists their workers and opens one card.
//!
//! The numbered list is a snapshot. Picking an entry re-reads the row, so a
//! worker deleted between the two messages yields a "not found" reply
//! instead of a stale card.

use crate::engine::Engine;
use crate::error::DialogueError;
use crate::state::{BrowseState, Dialogue};
use crate::texts;
use crate::validate;
use station_roster_core::{ChatId, StationId};
use station_roster_directory::Directory;
use station_roster_transport::{InboundEvent, Messenger};

impl<D: Directory, M: Messenger> Engine<D, M> {
    pub(crate) async fn start_browse(
        &self,
        chat: ChatId,
        station: StationId,
    ) -> Result<Option<Dialogue>, DialogueError> {
        let roster = self.roster_summaries(station).await?;
        if roster.is_empty() {
            self.messenger.send_text(chat, texts::NO_WORKERS).await?;
            return Ok(None);
        }
        let station_name = self.station_label(station).await;
        self.messenger
            .send_text(chat, &texts::roster_list(&station_name, &roster))
            .await?;
        Ok(Some(Dialogue::BrowseWorkers(BrowseState { roster })))
    }

    pub(crate) async fn browse_step(
        &self,
        event: &InboundEvent,
        state: BrowseState,
    ) -> Result<Option<Dialogue>, DialogueError> {
        let chat = event.chat;
        let choice = event
            .text()
            .and_then(|text| validate::roster_choice(text, state.roster.len()).ok());
        let Some(index) = choice else {
            self.messenger
                .send_text(chat, &texts::bad_roster_choice(state.roster.len()))
                .await?;
            return Ok(Some(Dialogue::BrowseWorkers(state)));
        };
        match self.directory.worker(state.roster[index].id).await? {
            Some(worker) => {
                self.send_worker_card(chat, &worker).await?;
            }
            None => {
                self.messenger.send_text(chat, texts::WORKER_GONE).await?;
            }
        }
        Ok(None)
    }
}

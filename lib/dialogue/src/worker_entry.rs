//! Enrollment dialogue: a station head adds one worker to their roster.
//!
//! Five prompts in a fixed order, each answer validated before the next
//! prompt goes out. Nothing touches the directory until the final answer,
//! so an abandoned or cancelled dialogue leaves no trace.

use crate::engine::Engine;
use crate::error::DialogueError;
use crate::keyboards;
use crate::state::{AddWorkerState, Dialogue};
use crate::texts;
use crate::validate;
use station_roster_core::{ChatId, StationId};
use station_roster_directory::{Directory, Position, Shift, WorkerDraft};
use station_roster_transport::{EventPayload, InboundEvent, Messenger, ReplyMarkup};
use tracing::warn;

impl<D: Directory, M: Messenger> Engine<D, M> {
    pub(crate) async fn start_add_worker(
        &self,
        chat: ChatId,
        station: StationId,
    ) -> Result<Option<Dialogue>, DialogueError> {
        self.messenger.send_text(chat, texts::ASK_FULL_NAME).await?;
        Ok(Some(Dialogue::AddWorker(AddWorkerState::AskFullName {
            station,
        })))
    }

    pub(crate) async fn add_worker_step(
        &self,
        event: &InboundEvent,
        state: AddWorkerState,
    ) -> Result<Option<Dialogue>, DialogueError> {
        let chat = event.chat;
        let next = match state {
            AddWorkerState::AskFullName { station } => {
                match event.text().map(validate::full_name) {
                    Some(Ok(full_name)) => {
                        self.messenger.send_text(chat, texts::ASK_TABEL).await?;
                        AddWorkerState::AskTabel { station, full_name }
                    }
                    _ => {
                        self.messenger.send_text(chat, texts::NAME_TOO_SHORT).await?;
                        AddWorkerState::AskFullName { station }
                    }
                }
            }
            AddWorkerState::AskTabel { station, full_name } => {
                match event.text().map(validate::tabel) {
                    Some(Ok(tabel)) => {
                        self.messenger
                            .send_message(chat, texts::ASK_POSITION, Some(&keyboards::positions()))
                            .await?;
                        AddWorkerState::AskPosition {
                            station,
                            full_name,
                            tabel,
                        }
                    }
                    _ => {
                        self.messenger.send_text(chat, texts::BAD_TABEL).await?;
                        AddWorkerState::AskTabel { station, full_name }
                    }
                }
            }
            AddWorkerState::AskPosition {
                station,
                full_name,
                tabel,
            } => match event.text().map(str::parse::<Position>) {
                Some(Ok(position)) => {
                    self.messenger
                        .send_message(chat, texts::ASK_SHIFT, Some(&keyboards::shifts()))
                        .await?;
                    AddWorkerState::AskShift {
                        station,
                        full_name,
                        tabel,
                        position,
                    }
                }
                _ => {
                    self.messenger
                        .send_message(chat, texts::BAD_POSITION, Some(&keyboards::positions()))
                        .await?;
                    AddWorkerState::AskPosition {
                        station,
                        full_name,
                        tabel,
                    }
                }
            },
            AddWorkerState::AskShift {
                station,
                full_name,
                tabel,
                position,
            } => match event.text().map(str::parse::<Shift>) {
                Some(Ok(shift)) => {
                    self.messenger
                        .send_message(chat, texts::ASK_PHOTO, Some(&ReplyMarkup::Remove))
                        .await?;
                    AddWorkerState::AskPhoto {
                        station,
                        full_name,
                        tabel,
                        position,
                        shift,
                    }
                }
                _ => {
                    self.messenger
                        .send_message(chat, texts::BAD_SHIFT, Some(&keyboards::shifts()))
                        .await?;
                    AddWorkerState::AskShift {
                        station,
                        full_name,
                        tabel,
                        position,
                    }
                }
            },
            AddWorkerState::AskPhoto {
                station,
                full_name,
                tabel,
                position,
                shift,
            } => {
                let photo = match &event.payload {
                    EventPayload::Photo { file_id } => Some(file_id.clone()),
                    EventPayload::Text { text } => validate::photo_url(text).ok(),
                    EventPayload::Callback { .. } => None,
                };
                let Some(photo) = photo else {
                    self.messenger.send_text(chat, texts::BAD_PHOTO).await?;
                    return Ok(Some(Dialogue::AddWorker(AddWorkerState::AskPhoto {
                        station,
                        full_name,
                        tabel,
                        position,
                        shift,
                    })));
                };
                let worker = self
                    .directory
                    .insert_worker(WorkerDraft {
                        station,
                        full_name,
                        tabel,
                        position,
                        shift,
                        photo,
                    })
                    .await?;
                // The row is in. From here on everything is best effort so a
                // flaky send cannot trigger a retry and a duplicate insert.
                let station_name = self.station_label(worker.station).await;
                let confirmation = texts::worker_added(&texts::worker_card(&worker, &station_name));
                if let Err(error) = self
                    .messenger
                    .send_message(chat, &confirmation, Some(&keyboards::main_menu()))
                    .await
                {
                    warn!(%error, worker = %worker.id, "enrollment confirmation did not reach the head");
                }
                self.notifier
                    .audit(&texts::worker_added_audit(&confirmation))
                    .await;
                return Ok(None);
            }
        };
        Ok(Some(Dialogue::AddWorker(next)))
    }
}

//! Edit dialogue: a station head reworks one worker, field by field.
//!
//! Every accepted value is written to the directory immediately, so an
//! interrupted dialogue keeps the edits made so far. The audit notice is
//! consolidated: one message when the head finishes, listing the touched
//! fields and showing the final card.

use crate::callback::CallbackAction;
use crate::engine::Engine;
use crate::error::DialogueError;
use crate::keyboards;
use crate::state::{Dialogue, EditWorkerState, PickField, TextField};
use crate::texts;
use crate::validate;
use station_roster_core::{ChatId, StationId, WorkerId};
use station_roster_directory::{Directory, WorkerPatch};
use station_roster_transport::{EventPayload, InboundEvent, Messenger};
use tracing::warn;

fn text_field_error(field: TextField) -> &'static str {
    match field {
        TextField::FullName => texts::NAME_TOO_SHORT,
        TextField::Tabel => texts::BAD_TABEL,
        TextField::Photo => texts::BAD_PHOTO,
    }
}

impl<D: Directory, M: Messenger> Engine<D, M> {
    pub(crate) async fn start_edit_worker(
        &self,
        chat: ChatId,
        station: StationId,
    ) -> Result<Option<Dialogue>, DialogueError> {
        let roster = self.roster_summaries(station).await?;
        if roster.is_empty() {
            self.messenger.send_text(chat, texts::NO_WORKERS).await?;
            return Ok(None);
        }
        self.messenger
            .send_text(chat, &texts::edit_pick_list(&roster))
            .await?;
        Ok(Some(Dialogue::EditWorker(EditWorkerState::PickWorker {
            roster,
        })))
    }

    pub(crate) async fn edit_worker_step(
        &self,
        event: &InboundEvent,
        state: EditWorkerState,
    ) -> Result<Option<Dialogue>, DialogueError> {
        let chat = event.chat;
        let next = match state {
            EditWorkerState::PickWorker { roster } => {
                let choice = event
                    .text()
                    .and_then(|text| validate::roster_choice(text, roster.len()).ok());
                match choice {
                    Some(index) => {
                        let worker = roster[index].id;
                        self.messenger
                            .send_message(chat, texts::FIELD_MENU, Some(&keyboards::field_menu()))
                            .await?;
                        EditWorkerState::FieldMenu {
                            worker,
                            changed: Vec::new(),
                        }
                    }
                    None => {
                        self.messenger
                            .send_text(chat, &texts::bad_roster_choice(roster.len()))
                            .await?;
                        EditWorkerState::PickWorker { roster }
                    }
                }
            }
            EditWorkerState::FieldMenu { worker, changed } => {
                return self.field_menu_step(event, worker, changed).await;
            }
            EditWorkerState::AwaitText {
                worker,
                field,
                mut changed,
            } => {
                let value = match (&event.payload, field) {
                    (EventPayload::Photo { file_id }, TextField::Photo) => Some(file_id.clone()),
                    (EventPayload::Text { text }, TextField::FullName) => {
                        validate::full_name(text).ok()
                    }
                    (EventPayload::Text { text }, TextField::Tabel) => validate::tabel(text).ok(),
                    (EventPayload::Text { text }, TextField::Photo) => {
                        validate::photo_url(text).ok()
                    }
                    _ => None,
                };
                let Some(value) = value else {
                    self.messenger
                        .send_text(chat, text_field_error(field))
                        .await?;
                    return Ok(Some(Dialogue::EditWorker(EditWorkerState::AwaitText {
                        worker,
                        field,
                        changed,
                    })));
                };
                let patch = match field {
                    TextField::FullName => WorkerPatch::FullName(value),
                    TextField::Tabel => WorkerPatch::Tabel(value),
                    TextField::Photo => WorkerPatch::Photo(value),
                };
                let label = patch.field_label();
                self.directory.update_worker(worker, patch).await?;
                if !changed.contains(&label) {
                    changed.push(label);
                }
                self.messenger
                    .send_message(
                        chat,
                        &texts::field_updated_ask_more(label),
                        Some(&keyboards::yes_no()),
                    )
                    .await?;
                EditWorkerState::AskEditMore { worker, changed }
            }
            EditWorkerState::AwaitPick {
                worker,
                field,
                mut changed,
            } => {
                let EventPayload::Callback {
                    message_id, data, ..
                } = &event.payload
                else {
                    // The pick has to come from the keyboard. Render it again.
                    self.send_pick_menu(chat, worker, field).await?;
                    return Ok(Some(Dialogue::EditWorker(EditWorkerState::AwaitPick {
                        worker,
                        field,
                        changed,
                    })));
                };
                let patch = match (field, CallbackAction::parse(data)) {
                    (PickField::Position, Some(CallbackAction::SetPosition { worker: w, position }))
                        if w == worker =>
                    {
                        Some(WorkerPatch::Position(position))
                    }
                    (PickField::Shift, Some(CallbackAction::SetShift { worker: w, shift }))
                        if w == worker =>
                    {
                        Some(WorkerPatch::Shift(shift))
                    }
                    (PickField::Station, Some(CallbackAction::MoveWorker { worker: w, station }))
                        if w == worker =>
                    {
                        Some(WorkerPatch::Station(station))
                    }
                    _ => None,
                };
                let Some(patch) = patch else {
                    // A tap from an older keyboard, or for another worker.
                    return Ok(Some(Dialogue::EditWorker(EditWorkerState::AwaitPick {
                        worker,
                        field,
                        changed,
                    })));
                };
                let label = patch.field_label();
                self.directory.update_worker(worker, patch).await?;
                if !changed.contains(&label) {
                    changed.push(label);
                }
                if let Err(error) = self
                    .messenger
                    .edit_text(chat, *message_id, &texts::field_updated(label))
                    .await
                {
                    warn!(%error, worker = %worker, "could not replace the pick keyboard");
                }
                self.messenger
                    .send_message(chat, texts::ASK_EDIT_MORE, Some(&keyboards::yes_no()))
                    .await?;
                EditWorkerState::AskEditMore { worker, changed }
            }
            EditWorkerState::AskEditMore { worker, changed } => match event.text() {
                Some(text) if text == texts::BTN_YES => {
                    self.messenger
                        .send_message(chat, texts::FIELD_MENU, Some(&keyboards::field_menu()))
                        .await?;
                    EditWorkerState::FieldMenu { worker, changed }
                }
                Some(text) if text == texts::BTN_NO => {
                    return self.finish_edit(chat, worker, changed).await;
                }
                _ => {
                    self.messenger
                        .send_message(chat, texts::ASK_EDIT_MORE, Some(&keyboards::yes_no()))
                        .await?;
                    EditWorkerState::AskEditMore { worker, changed }
                }
            },
        };
        Ok(Some(Dialogue::EditWorker(next)))
    }

    async fn field_menu_step(
        &self,
        event: &InboundEvent,
        worker: WorkerId,
        changed: Vec<&'static str>,
    ) -> Result<Option<Dialogue>, DialogueError> {
        let chat = event.chat;
        let choice = event.text().map(str::trim);
        let next = match choice {
            Some(text) if text == texts::BTN_FULL_NAME => {
                self.messenger
                    .send_text(chat, &texts::ask_new_value(TextField::FullName.label()))
                    .await?;
                EditWorkerState::AwaitText {
                    worker,
                    field: TextField::FullName,
                    changed,
                }
            }
            Some(text) if text == texts::BTN_TABEL => {
                self.messenger
                    .send_text(chat, &texts::ask_new_value(TextField::Tabel.label()))
                    .await?;
                EditWorkerState::AwaitText {
                    worker,
                    field: TextField::Tabel,
                    changed,
                }
            }
            Some(text) if text == texts::BTN_PHOTO => {
                self.messenger.send_text(chat, texts::ASK_PHOTO).await?;
                EditWorkerState::AwaitText {
                    worker,
                    field: TextField::Photo,
                    changed,
                }
            }
            Some(text) if text == texts::BTN_POSITION => {
                self.send_pick_menu(chat, worker, PickField::Position).await?;
                EditWorkerState::AwaitPick {
                    worker,
                    field: PickField::Position,
                    changed,
                }
            }
            Some(text) if text == texts::BTN_SHIFT => {
                self.send_pick_menu(chat, worker, PickField::Shift).await?;
                EditWorkerState::AwaitPick {
                    worker,
                    field: PickField::Shift,
                    changed,
                }
            }
            Some(text) if text == texts::BTN_CHANGE_STATION => {
                self.send_pick_menu(chat, worker, PickField::Station).await?;
                EditWorkerState::AwaitPick {
                    worker,
                    field: PickField::Station,
                    changed,
                }
            }
            Some(text) if text == texts::BTN_CANCEL => {
                self.messenger
                    .send_message(chat, texts::CANCELED, Some(&keyboards::main_menu()))
                    .await?;
                return self.audit_finished_edit(worker, changed).await;
            }
            _ => {
                self.messenger
                    .send_message(chat, texts::FIELD_MENU, Some(&keyboards::field_menu()))
                    .await?;
                EditWorkerState::FieldMenu { worker, changed }
            }
        };
        Ok(Some(Dialogue::EditWorker(next)))
    }

    async fn send_pick_menu(
        &self,
        chat: ChatId,
        worker: WorkerId,
        field: PickField,
    ) -> Result<(), DialogueError> {
        match field {
            PickField::Position => {
                self.messenger
                    .send_message(
                        chat,
                        texts::CHOOSE_NEW_POSITION,
                        Some(&keyboards::positions_for_worker(worker)),
                    )
                    .await?;
            }
            PickField::Shift => {
                self.messenger
                    .send_message(
                        chat,
                        texts::CHOOSE_NEW_SHIFT,
                        Some(&keyboards::shifts_for_worker(worker)),
                    )
                    .await?;
            }
            PickField::Station => {
                let stations = self.directory.stations().await?;
                self.messenger
                    .send_message(
                        chat,
                        texts::CHOOSE_NEW_STATION,
                        Some(&keyboards::stations_for_worker(worker, &stations)),
                    )
                    .await?;
            }
        }
        Ok(())
    }

    /// Closes the dialogue after "no more edits": confirmation to the head,
    /// then one consolidated audit notice if anything actually changed.
    async fn finish_edit(
        &self,
        chat: ChatId,
        worker: WorkerId,
        changed: Vec<&'static str>,
    ) -> Result<Option<Dialogue>, DialogueError> {
        self.messenger
            .send_message(chat, texts::EDIT_DONE, Some(&keyboards::main_menu()))
            .await?;
        self.audit_finished_edit(worker, changed).await
    }

    async fn audit_finished_edit(
        &self,
        worker: WorkerId,
        changed: Vec<&'static str>,
    ) -> Result<Option<Dialogue>, DialogueError> {
        if changed.is_empty() {
            return Ok(None);
        }
        // Edits are already committed, so a failed lookup here only costs
        // the audit notice.
        match self.directory.worker(worker).await {
            Ok(Some(current)) => {
                let station = self.station_label(current.station).await;
                let card = texts::worker_card(&current, &station);
                self.notifier.audit(&texts::edit_audit(&card, &changed)).await;
            }
            Ok(None) => {
                warn!(worker = %worker, "edited worker vanished before the audit notice");
            }
            Err(error) => {
                warn!(%error, worker = %worker, "could not load the edited worker for audit");
            }
        }
        Ok(None)
    }
}

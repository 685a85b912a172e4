//! Super-admin dialogues for the station-head register.
//!
//! Assigning walks id -> inline station menu -> upsert; removing is a
//! single id prompt. Both notify the affected user directly on top of the
//! audit notice, since heads gain or lose bot access on the spot.

use crate::callback::CallbackAction;
use crate::engine::Engine;
use crate::error::DialogueError;
use crate::keyboards;
use crate::state::{AssignHeadState, Dialogue, RemoveHeadState};
use crate::texts;
use crate::validate;
use station_roster_core::ChatId;
use station_roster_directory::Directory;
use station_roster_transport::{EventPayload, InboundEvent, Messenger};
use tracing::warn;

impl<D: Directory, M: Messenger> Engine<D, M> {
    pub(crate) async fn start_assign_head(
        &self,
        chat: ChatId,
    ) -> Result<Option<Dialogue>, DialogueError> {
        self.messenger.send_text(chat, texts::ASK_NEW_HEAD_ID).await?;
        Ok(Some(Dialogue::AssignHead(AssignHeadState::AskHeadId)))
    }

    pub(crate) async fn assign_head_step(
        &self,
        event: &InboundEvent,
        state: AssignHeadState,
    ) -> Result<Option<Dialogue>, DialogueError> {
        let chat = event.chat;
        match state {
            AssignHeadState::AskHeadId => {
                let head = event.text().and_then(|text| validate::head_id(text).ok());
                let Some(head) = head else {
                    self.messenger.send_text(chat, texts::BAD_HEAD_ID).await?;
                    return Ok(Some(Dialogue::AssignHead(AssignHeadState::AskHeadId)));
                };
                let stations = self.directory.stations().await?;
                if stations.is_empty() {
                    self.messenger.send_text(chat, texts::NO_STATIONS).await?;
                    return Ok(None);
                }
                self.messenger
                    .send_message(
                        chat,
                        texts::CHOOSE_STATION,
                        Some(&keyboards::stations_for_head(head, &stations)),
                    )
                    .await?;
                Ok(Some(Dialogue::AssignHead(AssignHeadState::ChooseStation {
                    head,
                })))
            }
            AssignHeadState::ChooseStation { head } => {
                let EventPayload::Callback {
                    message_id, data, ..
                } = &event.payload
                else {
                    let stations = self.directory.stations().await?;
                    self.messenger
                        .send_message(
                            chat,
                            texts::CHOOSE_STATION,
                            Some(&keyboards::stations_for_head(head, &stations)),
                        )
                        .await?;
                    return Ok(Some(Dialogue::AssignHead(AssignHeadState::ChooseStation {
                        head,
                    })));
                };
                match CallbackAction::parse(data) {
                    Some(CallbackAction::AssignStation { head: tapped, station })
                        if tapped == head =>
                    {
                        self.directory.assign_head(head, station).await?;
                        let station_name = self.station_label(station).await;
                        if let Err(error) = self
                            .messenger
                            .edit_text(chat, *message_id, &texts::head_assigned(head, &station_name))
                            .await
                        {
                            warn!(%error, head = %head, "could not replace the station keyboard");
                        }
                        self.notifier
                            .audit(&texts::head_assigned_audit(head, &station_name))
                            .await;
                        self.notifier
                            .direct(head, &texts::head_welcome_notice(&station_name))
                            .await;
                        Ok(None)
                    }
                    _ => {
                        // Tap from an older keyboard for some other head.
                        Ok(Some(Dialogue::AssignHead(AssignHeadState::ChooseStation {
                            head,
                        })))
                    }
                }
            }
        }
    }

    pub(crate) async fn start_remove_head(
        &self,
        chat: ChatId,
    ) -> Result<Option<Dialogue>, DialogueError> {
        self.messenger
            .send_text(chat, texts::ASK_REMOVE_HEAD_ID)
            .await?;
        Ok(Some(Dialogue::RemoveHead(RemoveHeadState::AskHeadId)))
    }

    pub(crate) async fn remove_head_step(
        &self,
        event: &InboundEvent,
        _state: RemoveHeadState,
    ) -> Result<Option<Dialogue>, DialogueError> {
        let chat = event.chat;
        let head = event.text().and_then(|text| validate::head_id(text).ok());
        let Some(head) = head else {
            self.messenger.send_text(chat, texts::BAD_HEAD_ID).await?;
            return Ok(Some(Dialogue::RemoveHead(RemoveHeadState::AskHeadId)));
        };
        let Some(removed) = self.directory.remove_head(head).await? else {
            self.messenger.send_text(chat, texts::HEAD_NOT_FOUND).await?;
            return Ok(None);
        };
        let station_name = self.station_label(removed.station).await;
        if let Err(error) = self
            .messenger
            .send_text(chat, &texts::head_removed(head))
            .await
        {
            warn!(%error, head = %head, "removal confirmation did not reach the admin");
        }
        self.notifier
            .audit(&texts::head_removed_audit(head, &station_name))
            .await;
        self.notifier
            .direct(head, &texts::head_removed_notice(&station_name))
            .await;
        Ok(None)
    }

    /// `/heads`: every station head with their station, one line each.
    pub(crate) async fn list_heads(&self, chat: ChatId) -> Result<(), DialogueError> {
        let assignments = self.directory.head_assignments().await?;
        if assignments.is_empty() {
            self.messenger.send_text(chat, texts::NO_HEADS).await?;
            return Ok(());
        }
        let rows: Vec<_> = assignments
            .into_iter()
            .map(|assignment| (assignment.station.name, assignment.user))
            .collect();
        self.messenger
            .send_text(chat, &texts::heads_list(&rows))
            .await?;
        Ok(())
    }
}

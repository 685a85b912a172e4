//! One-shot commands that run outside any dialogue.

use crate::engine::Engine;
use crate::error::DialogueError;
use crate::keyboards;
use crate::texts;
use station_roster_access::Role;
use station_roster_core::ChatId;
use station_roster_directory::Directory;
use station_roster_transport::{InboundEvent, Messenger};

impl<D: Directory, M: Messenger> Engine<D, M> {
    /// `/start`: greets by role. A head's arrival is also announced on the
    /// audit channel so admins see who is actually using the bot.
    pub(crate) async fn start_cmd(
        &self,
        event: &InboundEvent,
        role: Role,
    ) -> Result<(), DialogueError> {
        let chat = event.chat;
        match role {
            Role::SuperAdmin => {
                self.messenger
                    .send_text(chat, texts::SUPER_ADMIN_START)
                    .await?;
            }
            Role::StationHead(station) => {
                let station_name = self.station_label(station).await;
                self.messenger
                    .send_message(
                        chat,
                        &texts::head_welcome(&event.from_name, &station_name),
                        Some(&keyboards::main_menu()),
                    )
                    .await?;
                self.notifier
                    .audit(&texts::start_audit(&event.from_name, event.from, &station_name))
                    .await;
            }
            Role::Anonymous => {
                self.messenger.send_text(chat, texts::NOT_REGISTERED).await?;
            }
        }
        Ok(())
    }

    pub(crate) async fn help_cmd(&self, chat: ChatId, role: Role) -> Result<(), DialogueError> {
        let help = if role.is_super_admin() {
            texts::HELP_SUPER_ADMIN
        } else {
            texts::HELP_HEAD
        };
        self.messenger.send_text(chat, help).await?;
        Ok(())
    }

    /// `/all_workers`: the whole directory, grouped by station. Stations
    /// with an empty roster are skipped.
    pub(crate) async fn all_workers_cmd(&self, chat: ChatId) -> Result<(), DialogueError> {
        let stations = self.directory.stations().await?;
        if stations.is_empty() {
            self.messenger.send_text(chat, texts::NO_STATIONS).await?;
            return Ok(());
        }
        self.messenger
            .send_text(chat, texts::ALL_WORKERS_HEADER)
            .await?;
        for station in stations {
            let workers = self.directory.workers_by_station(station.id).await?;
            if workers.is_empty() {
                continue;
            }
            self.messenger
                .send_text(chat, &texts::station_header(&station.name))
                .await?;
            for worker in &workers {
                let card = texts::worker_card(worker, &station.name);
                match &worker.photo {
                    Some(photo) => {
                        self.messenger.send_photo(chat, photo, Some(&card)).await?;
                    }
                    None => self.messenger.send_text(chat, &card).await?,
                }
            }
        }
        Ok(())
    }
}

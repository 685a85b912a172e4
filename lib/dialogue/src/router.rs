//! Event dispatch: one inbound event in, at most one dialogue step out.
//!
//! The router resolves the sender's role, runs role-gated commands, and
//! feeds everything else into the sender's active session. Sessions are
//! taken out of the store for the duration of a step and put back after,
//! so two events for the same user can never interleave a dialogue.

use crate::engine::Engine;
use crate::error::DialogueError;
use crate::keyboards;
use crate::session::{EvictedSession, SessionStore};
use crate::state::Dialogue;
use crate::texts;
use chrono::{DateTime, Utc};
use station_roster_access::{Role, RoleResolver};
use station_roster_core::{ChatId, ChatUserId, StationId};
use station_roster_directory::Directory;
use station_roster_notify::Notifier;
use station_roster_transport::{EventPayload, InboundEvent, Messenger};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Routes inbound events to commands and dialogue steps.
pub struct Router<D, M> {
    engine: Engine<D, M>,
    resolver: RoleResolver,
    sessions: SessionStore,
    audit_chat: Option<ChatId>,
}

impl<D: Directory, M: Messenger> Router<D, M> {
    #[must_use]
    pub fn new(
        directory: Arc<D>,
        messenger: Arc<M>,
        resolver: RoleResolver,
        audit_chat: Option<ChatId>,
        sessions: SessionStore,
    ) -> Self {
        let notifier = Notifier::new(
            messenger.clone(),
            audit_chat,
            resolver.super_admins().iter().copied(),
        );
        Self {
            engine: Engine::new(directory, messenger, notifier),
            resolver,
            sessions,
            audit_chat,
        }
    }

    /// Handles one inbound event end to end.
    ///
    /// Never returns an error: failures are logged, the session (if any) is
    /// restored to its pre-step state, and the user gets a retry hint.
    #[instrument(skip(self, event), fields(user = %event.from, chat = %event.chat))]
    pub async fn dispatch(&self, event: InboundEvent) {
        if let EventPayload::Callback { id, .. } = &event.payload {
            // Ack first so the client stops its spinner even when the tap
            // turns out to be stale and gets dropped below.
            if let Err(error) = self.engine.messenger.ack_callback(id).await {
                debug!(%error, "callback ack failed");
            }
        }
        if self.audit_chat == Some(event.chat) {
            return;
        }
        if !event.private {
            return;
        }

        let user = event.from;
        let role = match self
            .resolver
            .resolve(self.engine.directory.as_ref(), user)
            .await
        {
            Ok(role) => role,
            Err(error) => {
                warn!(%error, "role resolution failed");
                let _ = self
                    .engine
                    .messenger
                    .send_text(event.chat, texts::TRY_AGAIN)
                    .await;
                return;
            }
        };

        if let Some(text) = event.text() {
            if self.run_command(&event, text.trim(), role).await {
                return;
            }
        }

        let Some(entry) = self.sessions.take(user) else {
            // No active dialogue and not a command. Nothing to do.
            return;
        };
        let before = entry.clone();
        match self.engine.advance(&event, entry.dialogue).await {
            Ok(Some(next)) => self.sessions.put(user, before.advanced(next, Utc::now())),
            Ok(None) => {
                info!(dialogue = before.dialogue.kind(), "dialogue finished");
            }
            Err(error) => {
                warn!(%error, dialogue = before.dialogue.kind(), "dialogue step failed, state kept");
                self.sessions.put(user, before);
                let _ = self
                    .engine
                    .messenger
                    .send_text(event.chat, texts::TRY_AGAIN)
                    .await;
            }
        }
    }

    /// Evicts idle sessions and tells their owners. Returns how many went.
    pub async fn sweep_idle_sessions(&self, now: DateTime<Utc>) -> usize {
        let evicted = self.sessions.sweep_idle(now);
        let count = evicted.len();
        for eviction in &evicted {
            self.notify_evicted(eviction).await;
        }
        count
    }

    /// Number of dialogues currently in flight.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Runs `text` as a command if it is one for this role. Returns true
    /// when the event was consumed, whether or not the command succeeded.
    async fn run_command(&self, event: &InboundEvent, text: &str, role: Role) -> bool {
        let user = event.from;
        let chat = event.chat;
        match text {
            "/start" => {
                self.report(chat, self.engine.start_cmd(event, role).await)
                    .await;
            }
            "/help" => {
                self.report(chat, self.engine.help_cmd(chat, role).await).await;
            }
            "/cancel" => {
                self.cancel_cmd(user, chat, role).await;
            }
            "/add_head" => {
                if self.require_super_admin(chat, role).await && self.ensure_idle(user, chat).await
                {
                    self.launch(user, chat, self.engine.start_assign_head(chat).await)
                        .await;
                }
            }
            "/remove_head" => {
                if self.require_super_admin(chat, role).await && self.ensure_idle(user, chat).await
                {
                    self.launch(user, chat, self.engine.start_remove_head(chat).await)
                        .await;
                }
            }
            "/heads" => {
                if self.require_super_admin(chat, role).await {
                    self.report(chat, self.engine.list_heads(chat).await).await;
                }
            }
            "/all_workers" => {
                if self.require_super_admin(chat, role).await {
                    self.report(chat, self.engine.all_workers_cmd(chat).await)
                        .await;
                }
            }
            _ if text == texts::BTN_ADD_WORKER => {
                if let Some(station) = self.require_head(chat, role).await {
                    if self.ensure_idle(user, chat).await {
                        self.launch(user, chat, self.engine.start_add_worker(chat, station).await)
                            .await;
                    }
                }
            }
            _ if text == texts::BTN_EDIT_WORKER => {
                if let Some(station) = self.require_head(chat, role).await {
                    if self.ensure_idle(user, chat).await {
                        self.launch(
                            user,
                            chat,
                            self.engine.start_edit_worker(chat, station).await,
                        )
                        .await;
                    }
                }
            }
            _ if text == texts::BTN_MY_WORKERS => {
                if let Some(station) = self.require_head(chat, role).await {
                    if self.ensure_idle(user, chat).await {
                        self.launch(user, chat, self.engine.start_browse(chat, station).await)
                            .await;
                    }
                }
            }
            _ => return false,
        }
        true
    }

    /// Gate for super-admin commands. Denies and returns false otherwise.
    async fn require_super_admin(&self, chat: ChatId, role: Role) -> bool {
        if role.is_super_admin() {
            return true;
        }
        let _ = self
            .engine
            .messenger
            .send_text(chat, texts::NO_PERMISSION)
            .await;
        false
    }

    /// Gate for station-head actions. Denies and returns None otherwise.
    async fn require_head(&self, chat: ChatId, role: Role) -> Option<StationId> {
        match role.managed_station() {
            Some(station) => Some(station),
            None => {
                let _ = self
                    .engine
                    .messenger
                    .send_text(chat, texts::NOT_A_HEAD)
                    .await;
                None
            }
        }
    }

    /// Starters are exclusive: a user runs one dialogue at a time.
    async fn ensure_idle(&self, user: ChatUserId, chat: ChatId) -> bool {
        if !self.sessions.contains(user) {
            return true;
        }
        let _ = self
            .engine
            .messenger
            .send_text(chat, texts::ALREADY_ACTIVE)
            .await;
        false
    }

    /// Installs a freshly started dialogue into the session store.
    ///
    /// Starters refuse to stack: the caller checks for an existing session
    /// before the first prompt goes out, so `begin` only races capacity.
    async fn launch(
        &self,
        user: ChatUserId,
        chat: ChatId,
        outcome: Result<Option<Dialogue>, DialogueError>,
    ) {
        match outcome {
            Ok(Some(dialogue)) => {
                info!(dialogue = dialogue.kind(), "dialogue started");
                match self.sessions.begin(user, dialogue, Utc::now()) {
                    Ok(Some(displaced)) => self.notify_evicted(&displaced).await,
                    Ok(None) => {}
                    Err(error) => {
                        warn!(%error, "session slot unexpectedly occupied");
                    }
                }
            }
            Ok(None) => {}
            Err(error) => {
                warn!(%error, "dialogue failed to start");
                let _ = self
                    .engine
                    .messenger
                    .send_text(chat, texts::TRY_AGAIN)
                    .await;
            }
        }
    }

    async fn cancel_cmd(&self, user: ChatUserId, chat: ChatId, role: Role) {
        match self.sessions.cancel(user) {
            Some(entry) => {
                info!(dialogue = entry.dialogue.kind(), "dialogue cancelled");
                let markup = matches!(role, Role::StationHead(_)).then(keyboards::main_menu);
                if let Err(error) = self
                    .engine
                    .messenger
                    .send_message(chat, texts::CANCELED, markup.as_ref())
                    .await
                {
                    warn!(%error, "cancel confirmation failed to send");
                }
            }
            None => {
                let _ = self
                    .engine
                    .messenger
                    .send_text(chat, texts::NOTHING_TO_CANCEL)
                    .await;
            }
        }
    }

    async fn notify_evicted(&self, eviction: &EvictedSession) {
        info!(
            user = %eviction.user,
            dialogue = eviction.entry.dialogue.kind(),
            reason = ?eviction.reason,
            "session evicted"
        );
        let _ = self
            .engine
            .messenger
            .send_text(ChatId::from(eviction.user), texts::SESSION_EXPIRED)
            .await;
    }

    async fn report(&self, chat: ChatId, outcome: Result<(), DialogueError>) {
        if let Err(error) = outcome {
            warn!(%error, "command failed");
            let _ = self
                .engine
                .messenger
                .send_text(chat, texts::TRY_AGAIN)
                .await;
        }
    }
}

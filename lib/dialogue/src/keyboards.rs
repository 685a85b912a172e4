//! Keyboard builders for menus the dialogues show.

use crate::callback::CallbackAction;
use crate::texts;
use station_roster_core::{ChatUserId, WorkerId};
use station_roster_directory::{Position, Shift, Station};
use station_roster_transport::{InlineButton, ReplyMarkup};

/// The idle keyboard shown to station heads.
#[must_use]
pub fn main_menu() -> ReplyMarkup {
    ReplyMarkup::Keyboard {
        rows: vec![
            vec![texts::BTN_ADD_WORKER.to_string()],
            vec![texts::BTN_EDIT_WORKER.to_string()],
            vec![texts::BTN_MY_WORKERS.to_string()],
        ],
    }
}

/// Position choices for the enrollment dialogue, two per row.
#[must_use]
pub fn positions() -> ReplyMarkup {
    let labels: Vec<String> = Position::ALL.iter().map(|p| p.as_str().to_string()).collect();
    ReplyMarkup::Keyboard {
        rows: labels.chunks(2).map(<[String]>::to_vec).collect(),
    }
}

/// Shift choices for the enrollment dialogue, one row of four.
#[must_use]
pub fn shifts() -> ReplyMarkup {
    ReplyMarkup::Keyboard {
        rows: vec![Shift::ALL.iter().map(ToString::to_string).collect()],
    }
}

/// The yes/no keyboard for the "edit another field?" question.
#[must_use]
pub fn yes_no() -> ReplyMarkup {
    ReplyMarkup::Keyboard {
        rows: vec![vec![texts::BTN_YES.to_string(), texts::BTN_NO.to_string()]],
    }
}

/// The field menu of the editing dialogue.
#[must_use]
pub fn field_menu() -> ReplyMarkup {
    ReplyMarkup::Keyboard {
        rows: vec![
            vec![texts::BTN_FULL_NAME.to_string(), texts::BTN_TABEL.to_string()],
            vec![texts::BTN_POSITION.to_string(), texts::BTN_SHIFT.to_string()],
            vec![texts::BTN_CHANGE_STATION.to_string(), texts::BTN_PHOTO.to_string()],
            vec![texts::BTN_CANCEL.to_string()],
        ],
    }
}

fn inline_grid(buttons: Vec<InlineButton>) -> ReplyMarkup {
    ReplyMarkup::Inline {
        rows: buttons.chunks(2).map(<[InlineButton]>::to_vec).collect(),
    }
}

/// Station buttons for assigning a head, two per row.
#[must_use]
pub fn stations_for_head(head: ChatUserId, stations: &[Station]) -> ReplyMarkup {
    inline_grid(
        stations
            .iter()
            .map(|station| {
                InlineButton::new(
                    station.name.clone(),
                    CallbackAction::AssignStation {
                        head,
                        station: station.id,
                    }
                    .encode(),
                )
            })
            .collect(),
    )
}

/// Station buttons for moving a worker, two per row.
#[must_use]
pub fn stations_for_worker(worker: WorkerId, stations: &[Station]) -> ReplyMarkup {
    inline_grid(
        stations
            .iter()
            .map(|station| {
                InlineButton::new(
                    station.name.clone(),
                    CallbackAction::MoveWorker {
                        worker,
                        station: station.id,
                    }
                    .encode(),
                )
            })
            .collect(),
    )
}

/// Position buttons for editing a worker.
#[must_use]
pub fn positions_for_worker(worker: WorkerId) -> ReplyMarkup {
    inline_grid(
        Position::ALL
            .iter()
            .map(|position| {
                InlineButton::new(
                    position.as_str(),
                    CallbackAction::SetPosition {
                        worker,
                        position: *position,
                    }
                    .encode(),
                )
            })
            .collect(),
    )
}

/// Shift buttons for editing a worker.
#[must_use]
pub fn shifts_for_worker(worker: WorkerId) -> ReplyMarkup {
    inline_grid(
        Shift::ALL
            .iter()
            .map(|shift| {
                InlineButton::new(
                    shift.to_string(),
                    CallbackAction::SetShift {
                        worker,
                        shift: *shift,
                    }
                    .encode(),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use station_roster_core::StationId;

    #[test]
    fn station_grid_packs_two_per_row() {
        let stations: Vec<Station> = (1..=5)
            .map(|i| Station {
                id: StationId::new(i),
                name: format!("Bekat {i}"),
            })
            .collect();

        let markup = stations_for_head(ChatUserId::new(123_456_789), &stations);
        let ReplyMarkup::Inline { rows } = markup else {
            panic!("expected inline markup");
        };
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[2].len(), 1);
        assert_eq!(rows[0][0].data, "setstation:123456789:1");
    }

    #[test]
    fn field_menu_offers_every_field_and_cancel() {
        let ReplyMarkup::Keyboard { rows } = field_menu() else {
            panic!("expected reply keyboard");
        };
        let labels: Vec<&str> = rows.iter().flatten().map(String::as_str).collect();
        assert_eq!(labels.len(), 7);
        assert!(labels.contains(&texts::BTN_CHANGE_STATION));
        assert!(labels.contains(&texts::BTN_CANCEL));
    }

    #[test]
    fn shift_buttons_cover_the_whole_range() {
        let ReplyMarkup::Inline { rows } = shifts_for_worker(WorkerId::new(3)) else {
            panic!("expected inline markup");
        };
        let payloads: Vec<&str> = rows.iter().flatten().map(|b| b.data.as_str()).collect();
        assert_eq!(
            payloads,
            ["setshift:3:1", "setshift:3:2", "setshift:3:3", "setshift:3:4"]
        );
    }
}

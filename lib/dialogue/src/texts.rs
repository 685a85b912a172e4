//! Every user-visible string, in one place.
//!
//! The UI speaks Uzbek. Keyboard button labels double as match patterns in
//! the dispatcher, so both sides must use these constants.

use crate::state::WorkerSummary;
use station_roster_core::ChatUserId;
use station_roster_directory::Worker;

// Main menu and shared buttons.
pub const BTN_ADD_WORKER: &str = "➕ Xodim qo'shish";
pub const BTN_EDIT_WORKER: &str = "✏️ Xodimni o'zgartirish";
pub const BTN_MY_WORKERS: &str = "Mening xodimlarim";
pub const BTN_FULL_NAME: &str = "👤 F.I.O";
pub const BTN_TABEL: &str = "🔢 Tabel";
pub const BTN_POSITION: &str = "💼 Lavozim";
pub const BTN_SHIFT: &str = "🕐 Smena";
pub const BTN_PHOTO: &str = "🖼️ Rasm";
pub const BTN_CHANGE_STATION: &str = "🏢 Bekatni o‘zgartirish";
pub const BTN_CANCEL: &str = "❌ Bekor qilish";
pub const BTN_YES: &str = "Ha";
pub const BTN_NO: &str = "Yo‘q";

// Access and /start.
pub const NO_PERMISSION: &str = "❌ Sizda ruxsat yo‘q.";
pub const NOT_A_HEAD: &str = "❌ Siz boshliq emassiz.";
pub const NOT_REGISTERED: &str = "❌ Siz bekat boshlig‘i sifatida ro‘yxatdan o‘tmagansiz.";
pub const SUPER_ADMIN_START: &str =
    "👑 Siz superadmin sifatida tizimdasiz.\n👉 /help buyrug‘ini bosing.";

pub const HELP_SUPER_ADMIN: &str = "🛠 Superadmin komandalar:\n\
     /add_head – yangi bekat boshlig‘i qo‘shish\n\
     /remove_head – bekat boshlig‘ini o‘chirish\n\
     /heads – boshliqlar ro‘yxati\n\
     /all_workers – barcha bekatlar va xodimlar ro‘yxati\n\n\
     ℹ️ Bekat boshlig‘i komandalar:\n\
     /start – botni boshlash\n\
     /cancel – joriy amalni bekor qilish\n";
pub const HELP_HEAD: &str = "ℹ️ Bekat boshlig‘i komandalar:\n\
     /start – botni boshlash\n\
     /cancel – joriy amalni bekor qilish\n";

#[must_use]
pub fn head_welcome(name: &str, station: &str) -> String {
    format!(
        "👋 Assalomu alaykum, {name}!\n✅ Siz {station} bekati boshlig‘i sifatida ro‘yxatdan o‘tgansiz."
    )
}

#[must_use]
pub fn start_audit(name: &str, user: ChatUserId, station: &str) -> String {
    format!("ℹ️ {name} (ID: {user}) `/start` bosdi.\n🏢 Bekat: {station}")
}

// Worker enrollment.
pub const ASK_FULL_NAME: &str = "👤 Yangi xodimning F.I.O sini kiriting:";
pub const NAME_TOO_SHORT: &str =
    "❌ F.I.O kamida uch so‘zdan iborat bo‘lishi kerak. Qayta kiriting:";
pub const ASK_TABEL: &str = "🔢 Tabel raqamini kiriting (5 ta raqam):";
pub const BAD_TABEL: &str =
    "❌ Tabel raqami roppa-rosa 5 ta raqamdan iborat bo‘lishi kerak. Qayta kiriting:";
pub const ASK_POSITION: &str = "💼 Lavozimini tanlang:";
pub const BAD_POSITION: &str = "❌ Lavozimni tugmalardan tanlang:";
pub const ASK_SHIFT: &str = "🕐 Smenani tanlang:";
pub const BAD_SHIFT: &str = "❌ Smena 1 dan 4 gacha bo‘lishi kerak. Tugmalardan tanlang:";
pub const ASK_PHOTO: &str =
    "🖼️ Xodimning rasm linkini yuboring yoki rasmini yuboring (jpg, png, webp):";
pub const BAD_PHOTO: &str =
    "❌ Faqat rasm yuborilishi yoki rasm linki bo‘lishi kerak. Qayta yuboring:";

/// The card shown for one worker, also used as the photo caption.
#[must_use]
pub fn worker_card(worker: &Worker, station: &str) -> String {
    format!(
        "👤 {}\n🔢 Tabel: {}\n💼 Lavozim: {}\n🕐 Smena: {}\n🏢 Bekat: {}",
        worker.full_name, worker.tabel, worker.position, worker.shift, station
    )
}

#[must_use]
pub fn worker_added(card: &str) -> String {
    format!("✅ Xodim qo‘shildi!\n{card}")
}

#[must_use]
pub fn worker_added_audit(confirmation: &str) -> String {
    format!("➕ Yangi xodim qo‘shildi!\n\n{confirmation}")
}

// Roster browsing.
pub const NO_WORKERS: &str = "❌ Sizda hozircha xodimlar yo‘q.";
pub const WORKER_GONE: &str = "❌ Xodim topilmadi.";

fn numbered(roster: &[WorkerSummary]) -> String {
    roster
        .iter()
        .enumerate()
        .map(|(i, worker)| format!("{}. {}", i + 1, worker.full_name))
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn roster_list(station: &str, roster: &[WorkerSummary]) -> String {
    format!(
        "🏢 Bekat: {station}\n📝 Xodimlar ro‘yxati:\n{}\n\nXodim raqamini yuboring:",
        numbered(roster)
    )
}

#[must_use]
pub fn bad_roster_choice(max: usize) -> String {
    format!("❌ 1 dan {max} gacha bo‘lgan raqamni yuboring:")
}

// Worker editing.
#[must_use]
pub fn edit_pick_list(roster: &[WorkerSummary]) -> String {
    format!(
        "✏️ Qaysi xodimni o‘zgartirasiz?\n{}\n\nXodim raqamini yuboring:",
        numbered(roster)
    )
}

pub const FIELD_MENU: &str = "Qaysi maydonni o‘zgartirmoqchisiz?";
pub const CHOOSE_NEW_POSITION: &str = "💼 Yangi lavozimni tanlang:";
pub const CHOOSE_NEW_SHIFT: &str = "🕐 Yangi smenani tanlang:";
pub const CHOOSE_NEW_STATION: &str = "🏢 Yangi bekatni tanlang:";
pub const ASK_EDIT_MORE: &str = "Yana boshqa maydonni o‘zgartirasizmi?";
pub const EDIT_DONE: &str = "✅ Tahrir yakunlandi.";
pub const CANCELED: &str = "Bekor qilindi.";

#[must_use]
pub fn ask_new_value(label: &str) -> String {
    format!("🔄 Yangi {label} kiriting:")
}

#[must_use]
pub fn field_updated(label: &str) -> String {
    format!("✅ {label} yangilandi.")
}

#[must_use]
pub fn field_updated_ask_more(label: &str) -> String {
    format!("✅ {label} yangilandi.\n{ASK_EDIT_MORE}")
}

#[must_use]
pub fn edit_audit(card: &str, changed: &[&str]) -> String {
    format!(
        "✏️ Xodim ma‘lumotlari yangilandi!\n🔄 O‘zgargan maydonlar: {}\n\n{card}",
        changed.join(", ")
    )
}

// Head assignment and removal.
pub const ASK_NEW_HEAD_ID: &str = "👤 Yangi boshliqning Telegram ID sini yuboring:";
pub const BAD_HEAD_ID: &str = "❌ Telegram ID noto‘g‘ri. 9–10 raqam bo‘lishi kerak.";
pub const CHOOSE_STATION: &str = "🏢 Bekatni tanlang:";
pub const ASK_REMOVE_HEAD_ID: &str = "🆔 O‘chiriladigan boshliqning Telegram ID sini yuboring:";
pub const HEAD_NOT_FOUND: &str = "❌ Bunday boshliq topilmadi.";
pub const NO_HEADS: &str = "❌ Hozircha boshliqlar yo‘q.";

#[must_use]
pub fn head_assigned(head: ChatUserId, station: &str) -> String {
    format!("✅ {head} boshliq qilib qo‘shildi.\n🏢 Bekat: {station}")
}

#[must_use]
pub fn head_assigned_audit(head: ChatUserId, station: &str) -> String {
    format!("👑 Yangi boshliq qo‘shildi!\n\n🆔 {head}\n🏢 Bekat: {station}")
}

#[must_use]
pub fn head_welcome_notice(station: &str) -> String {
    format!("👑 Siz {station} bekatiga boshliq etib tayinlandingiz!\n👉 /start buyrug‘ini bosing.")
}

#[must_use]
pub fn head_removed(head: ChatUserId) -> String {
    format!("✅ {head} boshliqlikdan olindi.")
}

#[must_use]
pub fn head_removed_audit(head: ChatUserId, station: &str) -> String {
    format!("🗑 Boshliq o‘chirildi!\n\n🆔 {head}\n🏢 Bekat: {station}")
}

#[must_use]
pub fn head_removed_notice(station: &str) -> String {
    format!("ℹ️ Siz {station} bekati boshlig‘i vazifasidan ozod etildingiz.")
}

#[must_use]
pub fn heads_list(rows: &[(String, ChatUserId)]) -> String {
    let lines = rows
        .iter()
        .map(|(station, head)| format!("🏢 {station} — 🆔 {head}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("👑 Boshliqlar ro‘yxati:\n{lines}")
}

// Full roster dump for super admins.
pub const ALL_WORKERS_HEADER: &str = "📋 Barcha bekatlar va xodimlar:";
pub const NO_STATIONS: &str = "❌ Hozircha hech qanday bekat yo‘q.";

#[must_use]
pub fn station_header(name: &str) -> String {
    format!("🏢 {name}:")
}

// Session housekeeping.
pub const ALREADY_ACTIVE: &str =
    "⚠️ Sizda tugallanmagan amal bor. Avval uni yakunlang yoki /cancel yuboring.";
pub const NOTHING_TO_CANCEL: &str = "ℹ️ Bekor qilinadigan amal yo‘q.";
pub const SESSION_EXPIRED: &str =
    "⏰ Amal uzoq davom etgani uchun bekor qilindi. Qaytadan boshlang.";
pub const TRY_AGAIN: &str = "⚠️ Xatolik yuz berdi. Iltimos, qayta urinib ko‘ring.";

#[cfg(test)]
mod tests {
    use super::*;
    use station_roster_core::{StationId, WorkerId};
    use station_roster_directory::{Position, Shift};

    #[test]
    fn worker_card_lists_every_field() {
        let worker = Worker {
            id: WorkerId::new(1),
            station: StationId::new(2),
            full_name: "Karimov Aziz Baxtiyorovich".to_string(),
            tabel: "01000".to_string(),
            position: Position::StationMaster,
            shift: Shift::new(2).expect("valid shift"),
            photo: Some("AgAC".to_string()),
        };

        let card = worker_card(&worker, "Chilonzor");
        assert!(card.contains("Karimov Aziz Baxtiyorovich"));
        assert!(card.contains("01000"));
        assert!(card.contains("ДСП"));
        assert!(card.contains("Smena: 2"));
        assert!(card.contains("Chilonzor"));
    }

    #[test]
    fn audit_notice_wraps_the_confirmation() {
        let confirmation = worker_added("👤 Aziz");
        let audit = worker_added_audit(&confirmation);
        assert!(audit.starts_with("➕ Yangi xodim qo‘shildi!\n\n✅ Xodim qo‘shildi!"));
    }

    #[test]
    fn roster_list_numbers_from_one() {
        let roster = vec![
            WorkerSummary {
                id: WorkerId::new(5),
                full_name: "Birinchi Xodim Testovich".to_string(),
            },
            WorkerSummary {
                id: WorkerId::new(9),
                full_name: "Ikkinchi Xodim Testovich".to_string(),
            },
        ];

        let list = roster_list("Oybek", &roster);
        assert!(list.contains("1. Birinchi Xodim Testovich"));
        assert!(list.contains("2. Ikkinchi Xodim Testovich"));
    }
}

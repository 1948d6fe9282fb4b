// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing strings and shared keyboards.
//!
//! Kept in one place so flows never hardcode copy. Menu labels double as
//! dispatch keys for idle-state text messages.

use ustabot_adapters::{Keyboard, ReplyButton};

// ── Main menu ───────────────────────────────────────────────────────────

pub const MENU_ACTIVE_JOBS: &str = "🛠 Active jobs";
pub const MENU_BALANCE: &str = "💰 Balance";
pub const MENU_HISTORY: &str = "📜 History";
pub const MENU_SETTINGS: &str = "⚙️ Settings";

pub const BTN_BACK: &str = "⬅️ Back";
pub const BTN_DONE: &str = "✅ Done";
pub const BTN_SHARE_PHONE: &str = "📱 Share phone number";
pub const BTN_SHARE_LOCATION: &str = "📍 Share location";

/// The persistent reply keyboard shown to active contractors.
pub fn main_menu_keyboard() -> Keyboard {
    Keyboard::Reply {
        rows: vec![
            vec![ReplyButton::text(MENU_ACTIVE_JOBS), ReplyButton::text(MENU_BALANCE)],
            vec![ReplyButton::text(MENU_HISTORY), ReplyButton::text(MENU_SETTINGS)],
        ],
    }
}

pub fn greeting(full_name: &str) -> String {
    format!("👋 Welcome back, {full_name}!")
}

// ── Gate / registration ─────────────────────────────────────────────────

pub const RESTRICTED: &str =
    "⛔ Your account is not active. Contact the operator to restore access.";
pub const PENDING_ACTIVATION: &str =
    "⏳ Your registration has been received. An operator will activate your account shortly.";

pub const ASK_PHONE: &str = "📱 Share your phone number to sign in or register.";
pub const BAD_PHONE: &str = "❗ That does not look like a phone number. Try again.";
pub const ASK_REGION: &str = "🌍 Pick your region:";
pub const NO_REGIONS: &str = "❗ No regions are configured yet. Contact the operator.";
pub const NO_DISTRICTS: &str = "❗ This region has no districts configured. Pick another region.";
pub const ASK_DISTRICTS: &str = "🏘 Pick the districts you cover, then confirm:";
pub const NEED_DISTRICT: &str = "❗ Pick at least one district.";
pub const ASK_LOCATION: &str = "📍 Share your base location.";
pub const ASK_FULL_NAME: &str = "✍️ Enter your full name.";
pub const SHORT_NAME: &str = "❗ The name is too short. Enter at least 3 characters.";
pub const REGISTRATION_BROKEN: &str =
    "❗ Something went wrong with the registration. Send /start to begin again.";

pub fn districts_header(count: usize) -> String {
    format!("{ASK_DISTRICTS}\nSelected: {count}")
}

pub fn registered(full_name: &str, region: &str, districts: &[String]) -> String {
    format!(
        "✅ Registered.\n\n👤 {full_name}\n🌍 {region}\n🏘 {}\n\n{PENDING_ACTIVATION}",
        districts.join(", ")
    )
}

// ── Flows ───────────────────────────────────────────────────────────────

pub const FAILURE_NOTICE: &str = "❗ Something went wrong. Try again.";
pub const ASK_WORK_AMOUNT: &str = "💰 Enter the service amount (digits only):";
pub const BAD_AMOUNT: &str = "❗ Enter a positive whole number.";
pub const ASK_EXPENSE_NOTE: &str = "✍️ What was this expense for?";
pub const BTN_TRAVEL_FARE: &str = "🚌 Travel fare";
pub const EXPENSE_PROMPT: &str =
    "🧾 Pick a category or type the expense name:";
pub const ASK_EXPENSE_AMOUNT: &str = "💵 Enter the amount (digits only):";
pub const NO_PARTS: &str = "❗ You have no parts in stock.";
pub const BAD_QTY: &str = "❗ Enter a positive quantity.";
pub const ASK_PRICE: &str = "💵 Enter the unit price (0 for the default price):";
pub const PHOTO_PROMPT: &str = "📷 Send photos of the finished work. Press Done when finished.";
pub const PHOTO_SAVED: &str = "✅ Photo saved.";
pub const NO_OPEN_JOBS: &str = "🎉 No open jobs right now.";
pub const LOGGED_OUT: &str = "🚪 You are signed out. Send /start to sign in again.";

pub fn parts_header(on_hand_pages: usize, page: u32) -> String {
    format!("🔩 Pick a part (page {}/{on_hand_pages}):", page + 1)
}

pub fn ask_qty(name: &str, on_hand: f64, uom: &str) -> String {
    format!("🔢 {name}: enter the quantity (on hand: {on_hand} {uom}).")
}

pub fn insufficient_stock(on_hand: f64) -> String {
    format!("❗ Not enough stock: only {on_hand} on hand. Enter a smaller quantity.")
}

pub fn finish_blocked(labels: &[&'static str]) -> String {
    format!("⛔ Cannot finish yet. Missing:\n{}", labels.join("\n"))
}

/// Back texts accepted from reply keyboards, case-insensitive.
pub fn is_back_text(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    t == BTN_BACK.to_lowercase() || t == "back" || t == "orqaga" || t == "⬅️"
}

pub fn is_done_text(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    t == BTN_DONE.to_lowercase() || t == "done" || t == "tayyor"
}

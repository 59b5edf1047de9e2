use wasm_bindgen::prelude::*;

use crate::lifecycle::{AvailableAction, DerivedState, OrderState, available_action};
use crate::normalize_owned_course;
use crate::types::{Course, OrderRecord};
use crate::units;
use crate::view::{card_view, hero_view};

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn error_result(msg: &str) -> JsValue {
    to_js(&serde_json::json!({ "error": msg }))
}

fn parse_derived_state(owned: bool, state_label: Option<&str>) -> DerivedState {
    if !owned {
        return DerivedState::NotOwned;
    }
    match state_label.and_then(|s| s.parse::<OrderState>().ok()) {
        Some(state) => DerivedState::Owned(state),
        None => DerivedState::Unrecognized,
    }
}

fn action_label(action: AvailableAction) -> &'static str {
    match action {
        AvailableAction::Purchase => "purchase",
        AvailableAction::Repurchase => "repurchase",
        AvailableAction::ConfirmReceipt => "confirmReceipt",
    }
}

/// Lowercase label for a raw contract state code, or null when the code is
/// unrecognized.
#[wasm_bindgen]
pub fn order_state_label(code: i64) -> Option<String> {
    OrderState::from_code(code).map(|s| s.to_string())
}

/// Merge a course and its on-chain order record into a display-ready
/// entity. Both arguments are JSON strings.
#[wasm_bindgen]
pub fn normalize_order(course_json: &str, record_json: &str) -> JsValue {
    let course: Course = match serde_json::from_str(course_json) {
        Ok(c) => c,
        Err(_) => return error_result("invalid course JSON"),
    };
    let record: OrderRecord = match serde_json::from_str(record_json) {
        Ok(r) => r,
        Err(_) => return error_result("invalid order record JSON"),
    };
    to_js(&normalize_owned_course(&course, &record))
}

/// Convert a decimal price to the chain's smallest unit, as a decimal
/// string (the amount exceeds JS number precision).
#[wasm_bindgen]
pub fn price_to_smallest_unit(price: &str) -> JsValue {
    match units::to_smallest_unit(price) {
        Ok(value) => to_js(&value.to_string()),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Render-time decision object for a course:
/// `{ state, isBusy, action, enabled }`.
#[wasm_bindgen]
pub fn lifecycle_decision(
    owned: bool,
    state_label: Option<String>,
    is_busy: bool,
    wallet_connected: bool,
) -> JsValue {
    let state = parse_derived_state(owned, state_label.as_deref());
    let action = available_action(state);
    let state_json = match state {
        DerivedState::NotOwned => serde_json::Value::String("none".to_string()),
        DerivedState::Owned(s) => serde_json::Value::String(s.to_string()),
        DerivedState::Unrecognized => serde_json::Value::Null,
    };
    to_js(&serde_json::json!({
        "state": state_json,
        "isBusy": is_busy,
        "action": action.map(action_label),
        "enabled": action.is_some() && wallet_connected && !is_busy,
    }))
}

/// Card projection for a course state:
/// `{ badge, grayscale, pulsing }`.
#[wasm_bindgen]
pub fn card_projection(owned: bool, state_label: Option<String>) -> JsValue {
    let card = card_view(parse_derived_state(owned, state_label.as_deref()));
    to_js(&serde_json::json!({
        "badge": card.badge.map(|b| format!("{b:?}")),
        "grayscale": card.grayscale,
        "pulsing": card.pulsing,
    }))
}

/// Hero projection for a course state: `{ badge, action }`.
#[wasm_bindgen]
pub fn hero_projection(
    owned: bool,
    state_label: Option<String>,
    is_busy: bool,
    wallet_connected: bool,
) -> JsValue {
    let state = parse_derived_state(owned, state_label.as_deref());
    let action = available_action(state);
    let decision = crate::ActionDecision {
        state,
        is_busy,
        action,
        enabled: action.is_some() && wallet_connected && !is_busy,
    };
    let hero = hero_view(&decision);
    to_js(&serde_json::json!({
        "badge": hero.badge.map(|b| format!("{b:?}")),
        "action": hero.action.map(|a| format!("{a:?}")),
    }))
}

//! Pure view-binding projections.
//!
//! Rendering is a function of `(state, busy, enabled)` only. These helpers
//! turn a lifecycle decision into display data; they never touch controller
//! state, and every [`DerivedState`] is matched exhaustively so no state can
//! go silently unrendered.

use crate::lifecycle::controller::ActionDecision;
use crate::lifecycle::{AvailableAction, DerivedState, OrderState};

/// Status badge shown on a course card or hero section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    /// The viewing account owns this course outright.
    Owner,
    /// Order canceled, payment refunded.
    CanceledRefunded,
    /// Payment accepted, order on its way.
    Shipping,
    /// The seller marked the order delivered; awaiting buyer confirmation.
    DeliveredBySeller,
    /// The on-chain state code was not recognized; shown as-is rather than
    /// hidden or crashed on.
    UnrecognizedState,
}

/// Summary-card projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView {
    pub badge: Option<Badge>,
    /// Render the cover image desaturated.
    pub grayscale: bool,
    /// Animate the badge (shipping indicator).
    pub pulsing: bool,
}

pub fn card_view(state: DerivedState) -> CardView {
    match state {
        DerivedState::NotOwned => CardView {
            badge: None,
            grayscale: false,
            pulsing: false,
        },
        DerivedState::Owned(OrderState::Purchased) => CardView {
            badge: Some(Badge::Shipping),
            grayscale: false,
            pulsing: true,
        },
        DerivedState::Owned(OrderState::Activated) => CardView {
            badge: Some(Badge::DeliveredBySeller),
            grayscale: false,
            pulsing: false,
        },
        DerivedState::Owned(OrderState::Deactivated) => CardView {
            badge: Some(Badge::CanceledRefunded),
            grayscale: true,
            pulsing: false,
        },
        DerivedState::Owned(OrderState::Delivered | OrderState::Completed) => CardView {
            badge: Some(Badge::Owner),
            grayscale: false,
            pulsing: false,
        },
        DerivedState::Unrecognized => CardView {
            badge: Some(Badge::UnrecognizedState),
            grayscale: false,
            pulsing: false,
        },
    }
}

/// Primary affordance on the hero/detail section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroAction {
    Purchase { enabled: bool, in_progress: bool },
    Repurchase { enabled: bool, in_progress: bool },
    ConfirmReceipt { enabled: bool, in_progress: bool },
    /// Static "yours" check for delivered/completed orders.
    OwnerCheck,
}

/// Hero/detail projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroView {
    pub badge: Option<Badge>,
    pub action: Option<HeroAction>,
}

pub fn hero_view(decision: &ActionDecision) -> HeroView {
    let badge = card_view(decision.state).badge;
    let action = match decision.action {
        Some(AvailableAction::Purchase) => Some(HeroAction::Purchase {
            enabled: decision.enabled,
            in_progress: decision.is_busy,
        }),
        Some(AvailableAction::Repurchase) => Some(HeroAction::Repurchase {
            enabled: decision.enabled,
            in_progress: decision.is_busy,
        }),
        Some(AvailableAction::ConfirmReceipt) => Some(HeroAction::ConfirmReceipt {
            enabled: decision.enabled,
            in_progress: decision.is_busy,
        }),
        None => match decision.state {
            DerivedState::Owned(OrderState::Delivered | OrderState::Completed) => {
                Some(HeroAction::OwnerCheck)
            }
            _ => None,
        },
    };
    HeroView { badge, action }
}

pub mod controller;
pub mod normalize;
pub mod store;

/// On-chain order state as recorded by the marketplace contract.
///
/// Transitions run forward along `purchased -> activated -> ... -> completed`
/// with a single backward branch: `deactivated -> purchased` on repurchase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Purchased,
    Activated,
    Deactivated,
    Delivered,
    Completed,
}

impl OrderState {
    /// Map a raw contract state code to its label. Codes outside `0..=4`
    /// yield `None`; an unrecognized code is a defined edge case the UI must
    /// surface, not an error.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Purchased),
            1 => Some(Self::Activated),
            2 => Some(Self::Deactivated),
            3 => Some(Self::Delivered),
            4 => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Purchased => 0,
            Self::Activated => 1,
            Self::Deactivated => 2,
            Self::Delivered => 3,
            Self::Completed => 4,
        }
    }
}

/// Lifecycle state of a course as seen by the viewing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedState {
    /// The account holds no order for this course.
    NotOwned,
    Owned(OrderState),
    /// An order exists but its state code is not one of the known five.
    Unrecognized,
}

impl DerivedState {
    /// Derive the lifecycle state from the cache entry for this course.
    pub fn from_lookup(owned: Option<&crate::types::OwnedCourse>) -> Self {
        match owned {
            None => Self::NotOwned,
            Some(entry) => entry.state.map_or(Self::Unrecognized, Self::Owned),
        }
    }
}

/// User action a course exposes in its current lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailableAction {
    Purchase,
    Repurchase,
    ConfirmReceipt,
}

/// The guarded-action table: which action, if any, the controller will
/// accept for a course in the given state. `purchased`, `delivered` and
/// `completed` are terminal for user action, as is an unrecognized state.
pub fn available_action(state: DerivedState) -> Option<AvailableAction> {
    match state {
        DerivedState::NotOwned => Some(AvailableAction::Purchase),
        DerivedState::Owned(OrderState::Deactivated) => Some(AvailableAction::Repurchase),
        DerivedState::Owned(OrderState::Activated) => Some(AvailableAction::ConfirmReceipt),
        DerivedState::Owned(
            OrderState::Purchased | OrderState::Delivered | OrderState::Completed,
        )
        | DerivedState::Unrecognized => None,
    }
}

#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod error;
pub mod lifecycle;
pub mod session;
pub mod types;
pub mod units;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::Error;
pub use lifecycle::controller::{ActionDecision, ActionOutcome, LifecycleController};
pub use lifecycle::normalize::normalize_owned_course;
pub use lifecycle::store::OwnedOrdersStore;
pub use lifecycle::{AvailableAction, DerivedState, OrderState, available_action};
pub use session::{
    ContractSession, CourseCatalog, NotificationSink, Settlement, TracingSink, encode_course_id,
    load_owned_courses,
};
pub use types::{Course, OrderRecord, OwnedCourse, PurchaseDetails};
pub use units::{from_smallest_unit, to_smallest_unit};
pub use view::{Badge, CardView, HeroAction, HeroView, card_view, hero_view};

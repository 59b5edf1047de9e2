use crate::lifecycle::OrderState;

/// A catalog course as served by the content source. Immutable for the
/// duration of a session.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Course {
    /// Content-addressed course identifier.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Asking price in whole currency units, decimal string (e.g. `"14.99"`).
    pub price: String,
    /// Card thumbnail.
    pub cover_image: String,
    /// Hero/detail image.
    pub image: String,
    /// URL path segment.
    pub slug: String,
    /// Catalog category label.
    #[serde(rename = "type")]
    pub course_type: String,
}

/// An order record as stored by the marketplace contract, mirrored locally.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct OrderRecord {
    /// Opaque identifier tying the order to a course.
    pub id: String,
    /// Address of the purchasing account.
    pub owner: String,
    /// Commitment binding the buyer's secret to the order hash, set at
    /// first purchase.
    pub proof: String,
    /// Amount paid, in the chain's smallest unit.
    pub price: u128,
    /// Raw state code; `0..=4` are the known states. Codes outside that
    /// range are preserved as unrecognized rather than rejected.
    pub state: i64,
}

/// Display-ready projection of a course the viewing account owns an order
/// for. Rebuilt from the raw record on every normalization pass; never a
/// source of truth.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OwnedCourse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cover_image: String,
    pub image: String,
    pub slug: String,
    pub course_type: String,
    /// Order id from the contract record.
    pub owned_course_id: String,
    /// Purchase-time commitment, needed again on repurchase.
    pub proof: String,
    /// Owner address from the contract record.
    pub owned: String,
    /// Paid amount converted back to whole currency units.
    pub price: String,
    /// `None` when the on-chain state code is not one of the known five.
    pub state: Option<OrderState>,
}

/// Purchase metadata collected by the order-detail form.
#[derive(Debug, Clone)]
pub struct PurchaseDetails {
    /// Buyer secret bound into the purchase proof.
    pub email: String,
}

use tracing::{error, info};

use crate::error::Error;
use crate::lifecycle::normalize::normalize_owned_course;
use crate::lifecycle::store::OwnedOrdersStore;
use crate::types::{Course, OrderRecord, OwnedCourse};

/// Finalized outcome of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub transaction_hash: String,
}

/// Wallet/contract boundary the lifecycle controller drives.
///
/// Implementations wrap a concrete wallet provider and the deployed
/// marketplace contract; commitment hashing stays behind this trait so the
/// core never picks a hash algorithm. Transaction methods resolve when the
/// chain settles the call, or fail with the provider's reason.
pub trait ContractSession {
    fn has_connected_wallet(&self) -> bool;

    /// Address of the viewing account.
    fn account(&self) -> String;

    /// Order-specific hash binding a course id encoding to the purchasing
    /// account.
    fn order_hash(&self, course_id_hex: &str, account: &str) -> String;

    /// Commitment binding a buyer secret to an order hash, produced at
    /// first purchase and stored on chain.
    fn purchase_proof(&self, secret: &str, order_hash: &str) -> String;

    fn purchase_course(
        &self,
        course_id_hex: &str,
        proof: &str,
        value: u128,
    ) -> impl Future<Output = Result<Settlement, String>>;

    fn repurchase_course(
        &self,
        order_hash: &str,
        value: u128,
    ) -> impl Future<Output = Result<Settlement, String>>;

    fn course_delivered(&self, order_hash: &str)
    -> impl Future<Output = Result<Settlement, String>>;

    /// Read an order record from the contract, if one exists for the hash.
    fn lookup_order(
        &self,
        order_hash: &str,
    ) -> impl Future<Output = Result<Option<OrderRecord>, String>>;
}

/// Course catalog source.
pub trait CourseCatalog {
    fn all_courses(&self) -> impl Future<Output = Result<Vec<Course>, Error>>;
}

/// Sink surfacing settlement outcomes to the user. Fire-and-forget from the
/// controller's perspective; a failing sink must not fail the action.
pub trait NotificationSink {
    fn notify_success(&self, course_id: &str, settlement: &Settlement);
    fn notify_failure(&self, course_id: &str, error: &Error);
}

/// Default sink that reports through the `tracing` pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify_success(&self, course_id: &str, settlement: &Settlement) {
        info!(course_id, transaction_hash = %settlement.transaction_hash, "transaction settled");
    }

    fn notify_failure(&self, course_id: &str, err: &Error) {
        error!(course_id, error = %err, "transaction failed");
    }
}

/// Hex encoding of a utf8 course id, `0x`-prefixed, as submitted to the
/// contract's purchase entry point.
pub fn encode_course_id(course_id: &str) -> String {
    let mut out = String::with_capacity(2 + course_id.len() * 2);
    out.push_str("0x");
    for byte in course_id.bytes() {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Rebuild the owned-orders store from the source of truth: walk the
/// catalog, look up each course's order hash on chain, and normalize every
/// hit for the viewing account. Installs the result and clears the stale
/// flag. Returns the fresh snapshot.
pub async fn load_owned_courses<C, S>(
    catalog: &C,
    session: &S,
    store: &OwnedOrdersStore,
) -> Result<Vec<OwnedCourse>, Error>
where
    C: CourseCatalog,
    S: ContractSession,
{
    let account = session.account();
    let courses = catalog.all_courses().await?;

    let mut owned = Vec::new();
    for course in &courses {
        let hash = session.order_hash(&encode_course_id(&course.id), &account);
        let record = session
            .lookup_order(&hash)
            .await
            .map_err(|reason| Error::Transaction { reason })?;
        if let Some(record) = record
            && record.owner == account
        {
            owned.push(normalize_owned_course(course, &record));
        }
    }

    info!(account = %account, count = owned.len(), "owned courses loaded");
    Ok(store.replace(owned))
}

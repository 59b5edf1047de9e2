use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::lifecycle::store::OwnedOrdersStore;
use crate::lifecycle::{AvailableAction, DerivedState, OrderState, available_action};
use crate::session::{ContractSession, NotificationSink, Settlement, TracingSink, encode_course_id};
use crate::types::{Course, OwnedCourse, PurchaseDetails};
use crate::units::{from_smallest_unit, to_smallest_unit};

/// Render-time decision object for one course: what the UI may offer and
/// whether the offer is currently actionable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDecision {
    pub state: DerivedState,
    pub is_busy: bool,
    pub action: Option<AvailableAction>,
    /// `action` is present, the wallet is connected and no transaction is
    /// in flight for this course.
    pub enabled: bool,
}

/// Outcome of an accepted action request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Settled(Settlement),
    /// A transaction for this course was already in flight; nothing was
    /// submitted. Duplicate requests are dropped silently so the UI can
    /// simply disable buttons.
    SkippedBusy,
}

/// Drives the order lifecycle for the session's account: derives the
/// current state per course, issues contract transactions, and reconciles
/// the shared owned-orders cache after settlement.
///
/// At most one action per course is in flight at a time; actions on
/// different courses proceed independently. The per-course busy marker is
/// advisory in-memory state, released on every exit path (including a
/// dropped future), and does not guard against other sessions.
pub struct LifecycleController<S, N = TracingSink> {
    session: S,
    store: Arc<OwnedOrdersStore>,
    busy: DashMap<String, ()>,
    sink: N,
}

impl<S: ContractSession> LifecycleController<S> {
    pub fn new(session: S, store: Arc<OwnedOrdersStore>) -> Self {
        Self::with_sink(session, store, TracingSink)
    }
}

impl<S: ContractSession, N: NotificationSink> LifecycleController<S, N> {
    pub fn with_sink(session: S, store: Arc<OwnedOrdersStore>, sink: N) -> Self {
        Self {
            session,
            store,
            busy: DashMap::new(),
            sink,
        }
    }

    pub fn store(&self) -> &OwnedOrdersStore {
        &self.store
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn is_busy(&self, course_id: &str) -> bool {
        self.busy.contains_key(course_id)
    }

    /// Compute the decision object the view renders from.
    pub fn decision(&self, course: &Course) -> ActionDecision {
        let state = DerivedState::from_lookup(self.store.lookup(&course.id).as_ref());
        let is_busy = self.is_busy(&course.id);
        let action = available_action(state);
        ActionDecision {
            state,
            is_busy,
            action,
            enabled: action.is_some() && self.session.has_connected_wallet() && !is_busy,
        }
    }

    /// First purchase of a course: binds the buyer secret into a proof,
    /// pays the course price, and on success appends an optimistic
    /// `purchased` entry to the cache.
    pub async fn purchase(
        &self,
        course: &Course,
        details: &PurchaseDetails,
    ) -> Result<ActionOutcome, Error> {
        if !self.session.has_connected_wallet() {
            return Err(Error::WalletNotConnected);
        }
        let Some(_guard) = self.begin(&course.id) else {
            return Ok(ActionOutcome::SkippedBusy);
        };

        let account = self.session.account();
        let course_id_hex = encode_course_id(&course.id);
        let order_hash = self.session.order_hash(&course_id_hex, &account);
        let proof = self.session.purchase_proof(&details.email, &order_hash);
        let value = to_smallest_unit(&course.price)?;

        debug!(course_id = %course.id, value, "submitting purchase");
        let result = self
            .session
            .purchase_course(&course_id_hex, &proof, value)
            .await
            .map_err(|reason| Error::Transaction { reason });

        match result {
            Ok(settlement) => {
                self.store.append(optimistic_entry(
                    course,
                    &order_hash,
                    &proof,
                    &account,
                    &from_smallest_unit(value),
                    OrderState::Purchased,
                ));
                info!(course_id = %course.id, "purchase settled");
                self.sink.notify_success(&course.id, &settlement);
                Ok(ActionOutcome::Settled(settlement))
            }
            Err(err) => {
                self.sink.notify_failure(&course.id, &err);
                Err(err)
            }
        }
    }

    /// Re-purchase after deactivation. The original proof already exists on
    /// chain, so only the order hash and payment are submitted. On success
    /// the existing cache entry flips back to `purchased` in place; a
    /// missing entry means the local view has drifted, so the whole cache
    /// is invalidated for a refetch instead.
    pub async fn repurchase(&self, course: &Course) -> Result<ActionOutcome, Error> {
        if !self.session.has_connected_wallet() {
            return Err(Error::WalletNotConnected);
        }
        let Some(_guard) = self.begin(&course.id) else {
            return Ok(ActionOutcome::SkippedBusy);
        };

        let account = self.session.account();
        let order_hash = self
            .session
            .order_hash(&encode_course_id(&course.id), &account);
        let value = to_smallest_unit(&course.price)?;

        debug!(course_id = %course.id, value, "submitting repurchase");
        let result = self
            .session
            .repurchase_course(&order_hash, value)
            .await
            .map_err(|reason| Error::Transaction { reason });

        match result {
            Ok(settlement) => {
                if self
                    .store
                    .set_state(&course.id, OrderState::Purchased)
                    .is_none()
                {
                    warn!(course_id = %course.id, "repurchased course missing from cache, forcing refetch");
                    self.store.invalidate();
                }
                info!(course_id = %course.id, "repurchase settled");
                self.sink.notify_success(&course.id, &settlement);
                Ok(ActionOutcome::Settled(settlement))
            }
            Err(err) => {
                self.sink.notify_failure(&course.id, &err);
                Err(err)
            }
        }
    }

    /// Buyer confirmation that the order arrived. Submits the order hash
    /// only, no payment; on success appends a `delivered` entry, which
    /// shadows the stale `activated` one in lookups.
    pub async fn confirm_receipt(&self, course: &Course) -> Result<ActionOutcome, Error> {
        if !self.session.has_connected_wallet() {
            return Err(Error::WalletNotConnected);
        }
        let Some(_guard) = self.begin(&course.id) else {
            return Ok(ActionOutcome::SkippedBusy);
        };

        let account = self.session.account();
        let order_hash = self
            .session
            .order_hash(&encode_course_id(&course.id), &account);

        debug!(course_id = %course.id, "submitting receipt confirmation");
        let result = self
            .session
            .course_delivered(&order_hash)
            .await
            .map_err(|reason| Error::Transaction { reason });

        match result {
            Ok(settlement) => {
                let entry = match self.store.lookup(&course.id) {
                    Some(existing) => OwnedCourse {
                        state: Some(OrderState::Delivered),
                        ..existing
                    },
                    None => optimistic_entry(
                        course,
                        &order_hash,
                        "",
                        &account,
                        &course.price,
                        OrderState::Delivered,
                    ),
                };
                self.store.append(entry);
                info!(course_id = %course.id, "receipt confirmation settled");
                self.sink.notify_success(&course.id, &settlement);
                Ok(ActionOutcome::Settled(settlement))
            }
            Err(err) => {
                self.sink.notify_failure(&course.id, &err);
                Err(err)
            }
        }
    }

    /// Claim the busy marker for a course, or `None` if an action is
    /// already in flight for it.
    fn begin(&self, course_id: &str) -> Option<BusyGuard<'_>> {
        use dashmap::mapref::entry::Entry;
        match self.busy.entry(course_id.to_string()) {
            Entry::Occupied(_) => {
                debug!(course_id, "action dropped, course already busy");
                None
            }
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(BusyGuard {
                    busy: &self.busy,
                    course_id: course_id.to_string(),
                })
            }
        }
    }
}

/// Cache entry matching what a refetch-and-normalize of the just-settled
/// order would produce.
fn optimistic_entry(
    course: &Course,
    order_hash: &str,
    proof: &str,
    account: &str,
    price: &str,
    state: OrderState,
) -> OwnedCourse {
    OwnedCourse {
        id: course.id.clone(),
        title: course.title.clone(),
        description: course.description.clone(),
        cover_image: course.cover_image.clone(),
        image: course.image.clone(),
        slug: course.slug.clone(),
        course_type: course.course_type.clone(),
        owned_course_id: order_hash.to_string(),
        proof: proof.to_string(),
        owned: account.to_string(),
        price: price.to_string(),
        state: Some(state),
    }
}

/// Releases the per-course busy marker on every exit path, success, error
/// or a dropped action future.
struct BusyGuard<'a> {
    busy: &'a DashMap<String, ()>,
    course_id: String,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.remove(&self.course_id);
    }
}

use crate::bid_input::BidInput;
use crate::config::WorkflowConfig;
use crate::gate::{enforce_eligibility, GateOutcome};
use crate::gateway::BidGateway;
use crate::handoff::{HandoffSlot, CHECKOUT_LISTING_KEY};
use crate::identity::IdentitySource;
use crate::listing::AuctionListing;
use crate::navigator::Navigator;
use crate::notify::{Notice, Notifier};
use crate::proposal::BidProposal;
use crate::session::SessionSource;
use crate::utils::{lock_connectable_mutex_safely, with_return_url};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{info, warn};
use validator::Validate;

pub const MSG_BID_PLACED: &str = "Your bid has been placed";
pub const MSG_SESSION_EXPIRED: &str = "Your session has expired, please sign in again";
pub const MSG_GENERIC_FAILURE: &str = "Something went wrong, please try again";

const AUTH_FAILURE_PHRASES: [&str; 3] = ["not logged in", "session expired", "unauthorized"];

/// The bid intake rejects an unauthenticated caller with one of a few known
/// phrases; those are redirect-worthy rather than generic failures.
pub fn is_auth_failure(message: &str) -> bool {
    let lowered = message.to_lowercase();
    AUTH_FAILURE_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceBidOutcome {
    /// Proposal accepted; the caller refreshes the listing and clears the
    /// input.
    Submitted(u64),
    /// Local validation failed; the error sits inline on the input.
    RejectedInput,
    Blocked(GateOutcome),
    SessionExpired,
    Failed,
    AlreadyInFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuyNowOutcome {
    CheckedOut(String),
    Blocked(GateOutcome),
    Failed,
    AlreadyInFlight,
}

/// Runs the two mutually exclusive action paths. Each path carries its own
/// in-flight flag, so a pending bid never blocks the buy-now affordance and
/// vice versa; a duplicate click on the same path is a no-op until the first
/// invocation settles.
pub struct ActionSubmitter {
    config: WorkflowConfig,
    bid_in_flight: AtomicBool,
    buy_now_in_flight: AtomicBool,
}

impl ActionSubmitter {
    pub fn new(config: WorkflowConfig) -> ActionSubmitter {
        ActionSubmitter {
            config,
            bid_in_flight: AtomicBool::new(false),
            buy_now_in_flight: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn bid_in_flight(&self) -> bool {
        self.bid_in_flight.load(Ordering::SeqCst)
    }

    pub fn buy_now_in_flight(&self) -> bool {
        self.buy_now_in_flight.load(Ordering::SeqCst)
    }

    /// Validate, gate, submit, in that strict order. The flag is cleared
    /// after the inner pipeline returns, whichever branch it took.
    pub async fn place_bid(
        &self,
        listing: &AuctionListing,
        input: &mut BidInput,
        current_route: &str,
        session_mutex: &Mutex<impl SessionSource>,
        identity_mutex: &Mutex<impl IdentitySource>,
        gateway_mutex: &Mutex<impl BidGateway>,
        navigator: &mut impl Navigator,
        notifier: &mut impl Notifier,
    ) -> PlaceBidOutcome {
        if self.bid_in_flight.swap(true, Ordering::SeqCst) {
            return PlaceBidOutcome::AlreadyInFlight;
        }
        let outcome = self
            .place_bid_inner(
                listing,
                input,
                current_route,
                session_mutex,
                identity_mutex,
                gateway_mutex,
                navigator,
                notifier,
            )
            .await;
        self.bid_in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    async fn place_bid_inner(
        &self,
        listing: &AuctionListing,
        input: &mut BidInput,
        current_route: &str,
        session_mutex: &Mutex<impl SessionSource>,
        identity_mutex: &Mutex<impl IdentitySource>,
        gateway_mutex: &Mutex<impl BidGateway>,
        navigator: &mut impl Navigator,
        notifier: &mut impl Notifier,
    ) -> PlaceBidOutcome {
        let amount = match input.validate(listing.current_bid) {
            Ok(amount) => amount,
            // Surfaced inline next to the field, not as a notice.
            Err(_) => return PlaceBidOutcome::RejectedInput,
        };

        let gate = enforce_eligibility(
            session_mutex,
            identity_mutex,
            current_route,
            navigator,
            notifier,
            &self.config,
        )
        .await;
        if gate != GateOutcome::Pass {
            return PlaceBidOutcome::Blocked(gate);
        }

        let proposal = BidProposal::new(&listing.id, &listing.auction_ref, amount);
        if proposal.validate().is_err() {
            notifier.notify(Notice::error(MSG_GENERIC_FAILURE));
            return PlaceBidOutcome::Failed;
        }

        info!(
            "Submitting bid of {} on listing {} ({})",
            amount, listing.id, listing.auction_ref
        );
        let result = {
            let mut gateway = match lock_connectable_mutex_safely(gateway_mutex).await {
                Ok(gateway) => gateway,
                Err(e) => {
                    warn!("Bid gateway unavailable: {}", e);
                    notifier.notify(Notice::error(MSG_GENERIC_FAILURE));
                    return PlaceBidOutcome::Failed;
                }
            };
            gateway.submit_bid(&proposal).await
        };

        match result {
            Ok(()) => {
                notifier.notify(Notice::success(MSG_BID_PLACED));
                PlaceBidOutcome::Submitted(amount)
            }
            Err(message) => {
                if is_auth_failure(&message) {
                    // The session died between the gate pass and the submit.
                    notifier.notify(Notice::error(MSG_SESSION_EXPIRED));
                    let route = with_return_url(&self.config.sign_in_route, current_route);
                    if let Err(e) = navigator.navigate(&route) {
                        warn!("Redirect to {} failed: {}", route, e);
                    }
                    PlaceBidOutcome::SessionExpired
                } else if message.is_empty() {
                    notifier.notify(Notice::error(MSG_GENERIC_FAILURE));
                    PlaceBidOutcome::Failed
                } else {
                    notifier.notify(Notice::error(&message));
                    PlaceBidOutcome::Failed
                }
            }
        }
    }

    /// Gate, stash the listing id for checkout, navigate. No network write
    /// of its own.
    pub async fn buy_now(
        &self,
        listing: &AuctionListing,
        current_route: &str,
        session_mutex: &Mutex<impl SessionSource>,
        identity_mutex: &Mutex<impl IdentitySource>,
        handoff: &mut impl HandoffSlot,
        navigator: &mut impl Navigator,
        notifier: &mut impl Notifier,
    ) -> BuyNowOutcome {
        if self.buy_now_in_flight.swap(true, Ordering::SeqCst) {
            return BuyNowOutcome::AlreadyInFlight;
        }
        let outcome = self
            .buy_now_inner(
                listing,
                current_route,
                session_mutex,
                identity_mutex,
                handoff,
                navigator,
                notifier,
            )
            .await;
        self.buy_now_in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    async fn buy_now_inner(
        &self,
        listing: &AuctionListing,
        current_route: &str,
        session_mutex: &Mutex<impl SessionSource>,
        identity_mutex: &Mutex<impl IdentitySource>,
        handoff: &mut impl HandoffSlot,
        navigator: &mut impl Navigator,
        notifier: &mut impl Notifier,
    ) -> BuyNowOutcome {
        let gate = enforce_eligibility(
            session_mutex,
            identity_mutex,
            current_route,
            navigator,
            notifier,
            &self.config,
        )
        .await;
        if gate != GateOutcome::Pass {
            return BuyNowOutcome::Blocked(gate);
        }

        handoff.put(CHECKOUT_LISTING_KEY, &listing.id);
        let route = listing.checkout_route();
        info!("Heading to checkout at {}", route);
        match navigator.navigate(&route) {
            Ok(()) => BuyNowOutcome::CheckedOut(route),
            Err(e) => {
                warn!("Checkout navigation failed: {}", e);
                notifier.notify(Notice::error(MSG_GENERIC_FAILURE));
                BuyNowOutcome::Failed
            }
        }
    }
}

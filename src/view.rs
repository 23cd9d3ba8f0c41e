use crate::bid_input::BidInput;
use crate::catalog::CatalogSource;
use crate::clock::CountdownClock;
use crate::config::WorkflowConfig;
use crate::gateway::BidGateway;
use crate::handoff::HandoffSlot;
use crate::identity::IdentitySource;
use crate::listing::AuctionListing;
use crate::navigator::Navigator;
use crate::notify::Notifier;
use crate::session::SessionSource;
use crate::submitter::{ActionSubmitter, BuyNowOutcome, PlaceBidOutcome};
use crate::utils::lock_connectable_mutex_safely;
use tokio::sync::Mutex;
use tracing::warn;

/// Composition root for one mounted auction page. Sole owner and writer of
/// the listing snapshot; the clock and the input only ever read from it.
pub struct AuctionView {
    listing: AuctionListing,
    route: String,
    pub input: BidInput,
    pub clock: CountdownClock,
    submitter: ActionSubmitter,
    alive: bool,
}

impl AuctionView {
    pub async fn mount(
        listing_id: &str,
        catalog_mutex: &Mutex<impl CatalogSource>,
        config: WorkflowConfig,
    ) -> Result<AuctionView, String> {
        let listing = {
            let mut catalog = lock_connectable_mutex_safely(catalog_mutex).await?;
            catalog.fetch_listing(listing_id).await?
        };
        let clock = CountdownClock::start(&listing.close_at);
        let route = listing.view_route();
        Ok(AuctionView {
            listing,
            route,
            input: BidInput::new(),
            clock,
            submitter: ActionSubmitter::new(config),
            alive: true,
        })
    }

    pub fn listing(&self) -> &AuctionListing {
        &self.listing
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Closed as far as the user is concerned: either the catalog already
    /// says so, or the countdown hit zero and the status refresh just has
    /// not landed yet.
    pub fn is_closed(&self) -> bool {
        !self.listing.is_open() || self.clock.remaining().is_zero()
    }

    pub fn set_bid_text(&mut self, raw: &str) {
        self.input.set(raw);
    }

    /// UI affordance guard; the submitter's own flag is the real gatekeeper.
    pub fn bid_submit_disabled(&self) -> bool {
        self.input.submit_disabled(self.submitter.bid_in_flight())
    }

    pub fn bump_bid(&mut self) {
        self.input
            .bump(self.listing.current_bid, self.submitter.config().quick_increment);
    }

    /// Re-fetches the authoritative listing. The clock is rebuilt only when
    /// the close time actually moved, and nothing is written after the await
    /// if the view was dismounted meanwhile.
    pub async fn refresh(&mut self, catalog_mutex: &Mutex<impl CatalogSource>) -> Result<(), String> {
        let fresh = {
            let mut catalog = lock_connectable_mutex_safely(catalog_mutex).await?;
            catalog.fetch_listing(&self.listing.id).await?
        };
        if !self.alive {
            return Ok(());
        }
        if fresh.close_at != self.listing.close_at {
            self.clock.restart(&fresh.close_at);
        }
        self.listing = fresh;
        Ok(())
    }

    pub async fn place_bid(
        &mut self,
        session_mutex: &Mutex<impl SessionSource>,
        identity_mutex: &Mutex<impl IdentitySource>,
        gateway_mutex: &Mutex<impl BidGateway>,
        catalog_mutex: &Mutex<impl CatalogSource>,
        navigator: &mut impl Navigator,
        notifier: &mut impl Notifier,
    ) -> PlaceBidOutcome {
        let outcome = self
            .submitter
            .place_bid(
                &self.listing,
                &mut self.input,
                &self.route,
                session_mutex,
                identity_mutex,
                gateway_mutex,
                navigator,
                notifier,
            )
            .await;
        if let PlaceBidOutcome::Submitted(_) = outcome {
            if self.alive {
                self.input.clear();
                if let Err(e) = self.refresh(catalog_mutex).await {
                    warn!("Listing refresh after bid failed: {}", e);
                }
            }
        }
        outcome
    }

    pub async fn buy_now(
        &mut self,
        session_mutex: &Mutex<impl SessionSource>,
        identity_mutex: &Mutex<impl IdentitySource>,
        handoff: &mut impl HandoffSlot,
        navigator: &mut impl Navigator,
        notifier: &mut impl Notifier,
    ) -> BuyNowOutcome {
        self.submitter
            .buy_now(
                &self.listing,
                &self.route,
                session_mutex,
                identity_mutex,
                handoff,
                navigator,
                notifier,
            )
            .await
    }

    pub fn submitter(&self) -> &ActionSubmitter {
        &self.submitter
    }

    pub fn dismount(&mut self) {
        self.alive = false;
        self.clock.stop();
    }
}

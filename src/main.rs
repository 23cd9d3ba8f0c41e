use dotenv::dotenv;
use ironlot_bidding::catalog::HttpCatalogProvider;
use ironlot_bidding::config::WorkflowConfig;
use ironlot_bidding::gate::{enforce_eligibility, GateOutcome};
use ironlot_bidding::identity::HttpIdentityProvider;
use ironlot_bidding::navigator::RouteLog;
use ironlot_bidding::notify::NoticeLog;
use ironlot_bidding::session::HttpSessionProvider;
use ironlot_bidding::utils::get_env_var;
use ironlot_bidding::view::AuctionView;
use lazy_static::lazy_static;
use tokio::sync::Mutex;
use tracing::info;

// Providers live in mutexes so connections are reused across workflow steps.
lazy_static! {
    static ref CATALOG: Mutex<HttpCatalogProvider> = Mutex::new(HttpCatalogProvider::new());
    static ref SESSION: Mutex<HttpSessionProvider> = Mutex::new(HttpSessionProvider::new());
    static ref IDENTITY: Mutex<HttpIdentityProvider> = Mutex::new(HttpIdentityProvider::new());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .init();

    let config = WorkflowConfig::default();
    let listing_id = get_env_var("LISTING_ID")?;
    let view = AuctionView::mount(&listing_id, &*CATALOG, config.clone()).await?;
    let listing = view.listing();
    info!(
        "{} {} ({}) at {}, current bid {}, buy now {}",
        listing.make,
        listing.model,
        listing.category,
        listing.auction_ref,
        listing.current_bid,
        listing.buy_now_price
    );

    let left = view.clock.remaining();
    if view.is_closed() {
        info!("Bidding is closed");
    } else {
        info!(
            "Closes in {}d {}h {}m {}s",
            left.days, left.hours, left.minutes, left.seconds
        );
    }

    let mut navigator = RouteLog::new();
    let mut notices = NoticeLog::new();
    let outcome = enforce_eligibility(
        &*SESSION,
        &*IDENTITY,
        view.route(),
        &mut navigator,
        &mut notices,
        &config,
    )
    .await;
    match outcome {
        GateOutcome::Pass => info!("Eligible to bid"),
        _ => info!("Not eligible to bid: {:?}", outcome),
    }
    Ok(())
}

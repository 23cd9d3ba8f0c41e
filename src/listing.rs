use crate::utils::slugify;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Open,
    Sold,
    Closed,
}

/// Read-model of a listing as served by the catalog service. The client never
/// writes any of these fields back; `current_bid` only moves by re-fetching
/// after an accepted bid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuctionListing {
    pub id: String,
    /// Public auction code. Opaque, and an administrator may regenerate it,
    /// so it is passed through unmodified everywhere.
    pub auction_ref: String,
    pub category: String,
    pub make: String,
    pub model: String,
    pub current_bid: u64,
    pub buy_now_price: u64,
    /// Close timestamp in the catalog's textual format, parsed by the clock.
    pub close_at: String,
    pub status: ListingStatus,
}

impl AuctionListing {
    pub fn is_open(&self) -> bool {
        self.status == ListingStatus::Open
    }

    /// Deterministic checkout route for the buy-now path:
    /// `/checkout/{category-slug}/{make-slug}/{model-slug}/{auctionRef}`.
    pub fn checkout_route(&self) -> String {
        format!(
            "/checkout/{}/{}/{}/{}",
            slugify(&self.category),
            slugify(&self.make),
            slugify(&self.model),
            self.auction_ref
        )
    }

    pub fn view_route(&self) -> String {
        format!("/listing/{}", self.id)
    }
}

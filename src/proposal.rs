use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// One proposal per submit click. Built after the gate passes, sent once,
/// discarded on response. Never retried automatically.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BidProposal {
    pub listing_id: String,
    pub auction_ref: String,
    /// Integer currency units. Must exceed the leading bid at validation
    /// time; the server remains the final arbiter.
    pub amount: u64,
}

impl BidProposal {
    pub fn new(listing_id: &str, auction_ref: &str, amount: u64) -> BidProposal {
        BidProposal {
            listing_id: listing_id.to_string(),
            auction_ref: auction_ref.to_string(),
            amount,
        }
    }
}

impl Validate for BidProposal {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.listing_id.is_empty() {
            return Err(ValidationErrors::new());
        };
        if self.auction_ref.is_empty() {
            return Err(ValidationErrors::new());
        };
        if self.amount == 0 {
            return Err(ValidationErrors::new());
        };

        Ok(())
    }
}

use crate::identity::IdentityStatus;
use crate::listing::{AuctionListing, ListingStatus};
use crate::session::SessionStatus;
use chrono::{Duration, Utc};

pub enum ListingOption {
    Open,
    AlreadyClosed,
    BadCloseTimestamp,
    Sold,
}

pub enum SessionOption {
    LoggedIn,
    LoggedOut,
    LookupFailed,
}

pub enum IdentityOption {
    Verified,
    NotUploaded,
    Rejected,
    Pending,
}

pub fn new_listing(option: ListingOption) -> AuctionListing {
    let close_at = match option {
        ListingOption::AlreadyClosed | ListingOption::Sold => "2020-01-01 00:00:00".to_string(),
        ListingOption::BadCloseTimestamp => "sometime next week".to_string(),
        ListingOption::Open => (Utc::now() + Duration::days(3))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    };
    let status = match option {
        ListingOption::Sold => ListingStatus::Sold,
        ListingOption::AlreadyClosed => ListingStatus::Closed,
        _ => ListingStatus::Open,
    };
    AuctionListing {
        id: "lst-4102".to_string(),
        auction_ref: "A-9921".to_string(),
        category: "Earthmoving Equipment".to_string(),
        make: "John Deere".to_string(),
        model: "310 SL".to_string(),
        current_bid: 1000,
        buy_now_price: 45000,
        close_at,
        status,
    }
}

pub fn new_session_status(option: SessionOption) -> SessionStatus {
    match option {
        SessionOption::LoggedIn => SessionStatus {
            success: true,
            is_logged_in: true,
        },
        SessionOption::LoggedOut => SessionStatus {
            success: true,
            is_logged_in: false,
        },
        SessionOption::LookupFailed => SessionStatus {
            success: false,
            is_logged_in: false,
        },
    }
}

pub fn new_identity_status(option: IdentityOption) -> IdentityStatus {
    match option {
        IdentityOption::Verified => IdentityStatus {
            is_upload: true,
            is_reject: false,
            is_verify: true,
        },
        IdentityOption::NotUploaded => IdentityStatus {
            is_upload: false,
            is_reject: false,
            is_verify: false,
        },
        IdentityOption::Rejected => IdentityStatus {
            is_upload: true,
            is_reject: true,
            is_verify: false,
        },
        IdentityOption::Pending => IdentityStatus {
            is_upload: true,
            is_reject: false,
            is_verify: false,
        },
    }
}

/// Raw catalog payload, the shape `fetch_listing` deserializes.
pub fn new_listing_json() -> String {
    r#"{
        "id": "lst-4102",
        "auction_ref": "A-9921",
        "category": "Earthmoving Equipment",
        "make": "John Deere",
        "model": "310 SL",
        "current_bid": 1000,
        "buy_now_price": 45000,
        "close_at": "2031-06-15 17:00:00",
        "status": "open"
    }"#
    .to_string()
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use std::sync::Mutex;

use crate::domain::{Auction, AuctionId, AuctionType, Event, Repository, User};
use crate::money::{Amount, AmountValue, Currency};
use crate::domain::timed_ascending;
use crate::persistence::PersistenceError;

/// Invoked after the in-memory repository has been updated; failures are
/// logged and do not roll back the repository.
pub type OnEvent = Box<dyn Fn(&Event) -> Result<(), PersistenceError> + Send + Sync>;

/// Injected clock; the domain itself never reads wall-clock time.
pub type Clock = Box<dyn Fn() -> OffsetDateTime + Send + Sync>;

/// Shared application state. The mutex serializes all command handling
/// against the repository; reads take the same lock and clone a snapshot.
pub struct AppState {
    pub repository: Mutex<Repository>,
    pub on_event: OnEvent,
    pub clock: Clock,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BidRequest {
    pub amount: AmountValue,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddAuctionRequest {
    pub id: AuctionId,
    #[serde(with = "time::serde::rfc3339", rename = "startsAt")]
    pub starts_at: OffsetDateTime,
    pub title: String,
    #[serde(with = "time::serde::rfc3339", rename = "endsAt")]
    pub ends_at: OffsetDateTime,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default, rename = "typ")]
    pub typ: Option<AuctionType>,
}

impl AddAuctionRequest {
    pub fn to_auction(&self, seller: User) -> Auction {
        let currency = self.currency.unwrap_or(Currency::VAC);
        let typ = self.typ.clone().unwrap_or_else(|| {
            AuctionType::TimedAscending(timed_ascending::Options::default_options())
        });

        Auction {
            auction_id: self.id,
            starts_at: self.starts_at,
            title: self.title.clone(),
            expiry: self.ends_at,
            seller,
            typ,
            auction_currency: currency,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuctionItem {
    pub id: AuctionId,
    #[serde(with = "time::serde::rfc3339", rename = "startsAt")]
    pub starts_at: OffsetDateTime,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expiry: OffsetDateTime,
    pub currency: Currency,
}

impl From<&Auction> for AuctionItem {
    fn from(auction: &Auction) -> Self {
        AuctionItem {
            id: auction.auction_id,
            starts_at: auction.starts_at,
            title: auction.title.clone(),
            expiry: auction.expiry,
            currency: auction.auction_currency,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuctionBid {
    pub amount: AmountValue,
    pub bidder: User,
}

#[derive(Debug, Serialize)]
pub struct AuctionDetail {
    pub id: AuctionId,
    #[serde(with = "time::serde::rfc3339", rename = "startsAt")]
    pub starts_at: OffsetDateTime,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expiry: OffsetDateTime,
    pub currency: Currency,

    pub bids: Vec<AuctionBid>,
    pub winner: Option<String>,
    #[serde(rename = "winnerPrice")]
    pub winner_price: Option<Amount>,
}

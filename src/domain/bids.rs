// src/domain/bids.rs
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use crate::money::AmountValue;
use super::core::{AuctionId, User};

/// A bid on an auction. The amount is a bare integer in the currency of the
/// auction it is placed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    #[serde(rename = "auction")]
    pub for_auction: AuctionId,
    #[serde(rename = "user")]
    pub bidder: User,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    #[serde(rename = "amount")]
    pub bid_amount: AmountValue,
}

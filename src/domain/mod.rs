// src/domain/mod.rs
pub mod auctions;
pub mod bids;
pub mod commands;
pub mod core;
pub mod states;
pub mod timed_ascending;
pub mod single_sealed_bid;

use std::collections::HashMap;

pub use self::auctions::*;
pub use self::bids::*;
pub use self::commands::*;
pub use self::core::*;
pub use self::states::*;

use crate::money::AmountValue;

pub type Repository = HashMap<AuctionId, (Auction, AuctionState)>;

pub fn auctions(repository: &Repository) -> Vec<Auction> {
    repository.values().map(|(auction, _)| auction.clone()).collect()
}

/// Point-in-time view of a single auction: its metadata, the state's view of
/// the bids, and the winner when the state yields one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionSnapshot {
    pub auction: Auction,
    pub bids: Vec<Bid>,
    pub winner: Option<UserId>,
    pub winner_price: Option<AmountValue>,
}

pub fn describe_auction(repository: &Repository, auction_id: AuctionId) -> Option<AuctionSnapshot> {
    repository.get(&auction_id).map(|(auction, state)| {
        let (winner_price, winner) = match state.try_get_amount_and_winner() {
            Some((amount, user_id)) => (Some(amount), Some(user_id)),
            None => (None, None),
        };
        AuctionSnapshot {
            auction: auction.clone(),
            bids: state.get_bids(),
            winner,
            winner_price,
        }
    })
}

pub fn handle(command: Command, mut repository: Repository) -> Result<(Event, Repository), Errors> {
    match command {
        Command::AddAuction { timestamp, auction } => {
            let auction_id = auction.auction_id;
            if !repository.contains_key(&auction_id) {
                let empty = empty_state(&auction);
                repository.insert(auction_id, (auction.clone(), empty));

                Ok((Event::AuctionAdded { timestamp, auction }, repository))
            } else {
                Err(Errors::AuctionAlreadyExists(auction_id))
            }
        }

        Command::PlaceBid { timestamp, bid } => {
            let auction_id = bid.for_auction;
            match repository.get(&auction_id) {
                Some((auction, state)) => {
                    validate_bid(&bid, auction)?;

                    let (next_auction_state, bid_result) = state.add_bid(bid.clone());
                    bid_result?;

                    let auction = auction.clone();
                    repository.insert(auction_id, (auction, next_auction_state));
                    Ok((Event::BidAccepted { timestamp, bid }, repository))
                }
                None => Err(Errors::UnknownAuction(auction_id)),
            }
        }
    }
}

/// Fold an event log, in log order, into a repository. The log is the
/// canonical truth: duplicate auction ids overwrite, bids on unknown auctions
/// are skipped, and bid application errors are ignored (the state is still
/// refreshed to the bid time by `add_bid`).
pub fn events_to_repository(events: &[Event]) -> Repository {
    let mut repository = Repository::new();

    for event in events {
        match event {
            Event::AuctionAdded { auction, .. } => {
                let state = empty_state(auction);
                repository.insert(auction.auction_id, (auction.clone(), state));
            }
            Event::BidAccepted { bid, .. } => {
                if let Some((auction, state)) = repository.get(&bid.for_auction) {
                    let auction = auction.clone();
                    let (next_state, _) = state.add_bid(bid.clone());
                    repository.insert(bid.for_auction, (auction, next_state));
                }
            }
        }
    }

    repository
}

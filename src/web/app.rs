use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result};
use actix_web::middleware::Logger;
use base64::{Engine as _, engine::general_purpose};
use log::{error, info};
use serde_json::Value;
use std::sync::Mutex;
use time::OffsetDateTime;

use crate::domain::{auctions, describe_auction, handle, AuctionId, Bid, Command, Errors, Event, Repository, User};
use crate::money::Amount;
use super::types::{
    AddAuctionRequest, ApiError, AppState, AuctionBid, AuctionDetail, AuctionItem, BidRequest,
    OnEvent,
};

// Decode the pre-verified JWT payload carried in the x-jwt-payload header:
// a base64 JSON object {sub, name?, u_typ}.
pub fn decode_jwt_user(payload: &str) -> Result<User, Errors> {
    let decoded = general_purpose::STANDARD
        .decode(payload)
        .or_else(|_| general_purpose::URL_SAFE_NO_PAD.decode(payload))
        .map_err(|_| Errors::InvalidUserData("invalid base64 payload".to_string()))?;
    let json_str = String::from_utf8(decoded)
        .map_err(|_| Errors::InvalidUserData("payload is not valid UTF-8".to_string()))?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|_| Errors::InvalidUserData("payload is not valid JSON".to_string()))?;

    let sub = json.get("sub").and_then(Value::as_str)
        .ok_or_else(|| Errors::InvalidUserData("missing sub".to_string()))?;
    let u_typ = json.get("u_typ").and_then(Value::as_str)
        .ok_or_else(|| Errors::InvalidUserData("missing u_typ".to_string()))?;

    match u_typ {
        "0" => {
            let name = json.get("name").and_then(Value::as_str)
                .ok_or_else(|| Errors::InvalidUserData("missing name".to_string()))?;
            Ok(User::BuyerOrSeller {
                user_id: sub.to_string(),
                name: name.to_string(),
            })
        }
        "1" => Ok(User::Support {
            user_id: sub.to_string(),
        }),
        other => Err(Errors::InvalidUserData(format!("unknown user type: {}", other))),
    }
}

// Read x-jwt-payload header and extract user information
fn get_auth_user(req: &HttpRequest) -> Result<User, Errors> {
    let auth_header = req.headers().get("x-jwt-payload")
        .ok_or_else(|| Errors::InvalidUserData("missing x-jwt-payload header".to_string()))?;
    let auth_str = auth_header.to_str()
        .map_err(|_| Errors::InvalidUserData("malformed x-jwt-payload header".to_string()))?;

    decode_jwt_user(auth_str.trim())
}

// Middleware to require authentication
async fn with_auth<F>(req: HttpRequest, f: F) -> Result<HttpResponse>
where
    F: FnOnce(User) -> Result<HttpResponse>
{
    match get_auth_user(&req) {
        Ok(user) => f(user),
        Err(err) => {
            Ok(HttpResponse::Unauthorized().json(ApiError { message: err.to_string() }))
        }
    }
}

fn error_response(err: &Errors) -> HttpResponse {
    let body = ApiError { message: err.to_string() };
    match err {
        Errors::UnknownAuction(_) => HttpResponse::NotFound().json(body),
        Errors::AuctionAlreadyExists(_) => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

// Run a command against the shared repository under the writer lock. The
// persistence callback is invoked after the in-memory update, in acceptance
// order; a persistence failure is logged and the event stays visible.
fn apply_command(state: &AppState, command: Command) -> Result<Event, Errors> {
    let mut repository = state.repository.lock().unwrap();

    let (event, next_repository) = handle(command, repository.clone())?;
    *repository = next_repository;

    if let Err(err) = (state.on_event)(&event) {
        error!("Failed to persist event: {}", err);
    }

    Ok(event)
}

// Get all auctions
async fn get_auctions(data: web::Data<AppState>) -> Result<HttpResponse> {
    let repository = data.repository.lock().unwrap();
    let auction_list: Vec<AuctionItem> = auctions(&repository)
        .iter()
        .map(AuctionItem::from)
        .collect();

    Ok(HttpResponse::Ok().json(auction_list))
}

// Get auction by ID
async fn get_auction(
    path: web::Path<AuctionId>,
    data: web::Data<AppState>
) -> Result<HttpResponse> {
    let auction_id = path.into_inner();
    let repository = data.repository.lock().unwrap();

    match describe_auction(&repository, auction_id) {
        Some(snapshot) => {
            let auction = snapshot.auction;

            let bids = snapshot.bids.iter().map(|bid| {
                AuctionBid {
                    amount: bid.bid_amount,
                    bidder: bid.bidder.clone(),
                }
            }).collect();

            let detail = AuctionDetail {
                id: auction.auction_id,
                starts_at: auction.starts_at,
                title: auction.title.clone(),
                expiry: auction.expiry,
                currency: auction.auction_currency,
                bids,
                winner: snapshot.winner,
                winner_price: snapshot.winner_price
                    .map(|v| Amount::new(auction.auction_currency, v)),
            };

            Ok(HttpResponse::Ok().json(detail))
        }
        None => {
            let error = ApiError {
                message: "Auction not found".to_string(),
            };
            Ok(HttpResponse::NotFound().json(error))
        }
    }
}

// Create a new auction
async fn create_auction(
    req: HttpRequest,
    auction_req: web::Json<AddAuctionRequest>,
    data: web::Data<AppState>
) -> Result<HttpResponse> {
    with_auth(req, |user| {
        let auction = auction_req.to_auction(user);
        let now = (data.clock)();
        let command = Command::AddAuction {
            timestamp: now,
            auction,
        };

        match apply_command(&data, command) {
            Ok(event) => Ok(HttpResponse::Ok().json(event)),
            Err(err) => Ok(error_response(&err)),
        }
    }).await
}

// Place a bid on an auction
async fn place_bid(
    req: HttpRequest,
    path: web::Path<AuctionId>,
    bid_req: web::Json<BidRequest>,
    data: web::Data<AppState>
) -> Result<HttpResponse> {
    let auction_id = path.into_inner();

    with_auth(req, |user| {
        let now = (data.clock)();

        let bid = Bid {
            for_auction: auction_id,
            bidder: user,
            at: now,
            bid_amount: bid_req.amount,
        };

        let command = Command::PlaceBid {
            timestamp: now,
            bid,
        };

        match apply_command(&data, command) {
            Ok(event) => Ok(HttpResponse::Ok().json(event)),
            Err(err) => Ok(error_response(&err)),
        }
    }).await
}

// Configure routes
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("/auctions", web::get().to(get_auctions))
            .route("/auctions/{id}", web::get().to(get_auction))
            .route("/auctions", web::post().to(create_auction))
            .route("/auctions/{id}/bids", web::post().to(place_bid))
    );
}

// Main application
pub async fn run_app(repository: Repository, on_event: OnEvent, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(AppState {
        repository: Mutex::new(repository),
        on_event,
        clock: Box::new(OffsetDateTime::now_utc),
    });

    info!("Starting server on port {}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure_app)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}

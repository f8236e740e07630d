use auction_engine::domain::{AuctionType, Auction};
use auction_engine::domain::timed_ascending::Options as TAOptions;
use auction_engine::money::Currency;
use auction_engine::web::app::decode_jwt_user;
use auction_engine::web::types::{AddAuctionRequest, BidRequest};
use base64::{Engine as _, engine::general_purpose};
use serde_json::json;
#[path="utils/mod.rs"] mod utils;
use utils::*;

#[test]
fn test_auction_request_deserialization() {
    // Create a JSON representation of an auction request
    let json_data = json!({
        "id": 1,
        "startsAt": "2016-01-01T08:28:00.000Z",
        "endsAt": "2016-02-01T08:28:00.000Z",
        "title": "First auction"
    });

    // Deserialize to AddAuctionRequest
    let request: AddAuctionRequest = serde_json::from_value(json_data).unwrap();

    // Verify fields
    assert_eq!(request.id, sample_auction_id());
    assert_eq!(request.starts_at, sample_starts_at());
    assert_eq!(request.ends_at, sample_ends_at());
    assert_eq!(request.title, "First auction");

    // Create an auction from the request
    let auction = request.to_auction(sample_seller());

    // Verify the auction has correct default values for non-specified fields
    assert_eq!(auction.auction_currency, Currency::VAC);

    // Verify auction type is TimedAscending with default options
    match auction.typ {
        AuctionType::TimedAscending(options) => {
            assert_eq!(options.reserve_price, 0);
            assert_eq!(options.min_raise, 0);
        },
        _ => panic!("Expected TimedAscending auction type"),
    }
}

#[test]
fn test_auction_request_with_currency_deserialization() {
    // Create a JSON representation of an auction request with currency
    let json_data = json!({
        "id": 1,
        "startsAt": "2016-01-01T00:00:00.000Z",
        "endsAt": "2016-02-01T00:00:00.000Z",
        "title": "First auction",
        "currency": "SEK"
    });

    // Deserialize to AddAuctionRequest
    let request: AddAuctionRequest = serde_json::from_value(json_data).unwrap();

    // Create an auction from the request
    let auction = request.to_auction(sample_seller());

    // Verify the auction has the specified currency
    assert_eq!(auction.auction_currency, Currency::SEK);
}

#[test]
fn test_auction_request_with_type_deserialization() {
    let json_data = json!({
        "id": 1,
        "startsAt": "2016-01-01T00:00:00.000Z",
        "endsAt": "2016-02-01T00:00:00.000Z",
        "title": "Sealed auction",
        "typ": "Vickrey"
    });

    let request: AddAuctionRequest = serde_json::from_value(json_data).unwrap();
    let auction = request.to_auction(sample_seller());

    match auction.typ {
        AuctionType::SingleSealedBid(_) => {},
        _ => panic!("Expected SingleSealedBid auction type"),
    }
}

#[test]
fn test_bid_request_deserialization() {
    // Create a JSON representation of a bid request
    let json_data = json!({
        "amount": 10
    });

    // Deserialize to BidRequest
    let request: BidRequest = serde_json::from_value(json_data).unwrap();

    // Verify fields
    assert_eq!(request.amount, 10);
}

#[test]
fn test_auction_serialization() {
    // Create an auction
    let auction = Auction {
        auction_id: sample_auction_id(),
        starts_at: sample_starts_at(),
        title: "First auction".to_string(),
        expiry: sample_ends_at(),
        seller: sample_seller(),
        auction_currency: Currency::VAC,
        typ: AuctionType::TimedAscending(TAOptions::default_options()),
    };

    // Serialize to JSON
    let json = serde_json::to_value(&auction).unwrap();

    // Verify serialized format
    assert_eq!(json["id"], json!(1), "id {:?}", json["id"]);
    assert_eq!(json["startsAt"], json!("2016-01-01T08:28:00Z"), "startsAt {:?}", json["startsAt"]);
    assert_eq!(json["title"], json!("First auction"), "title {:?}", json["title"]);
    assert_eq!(json["expiry"], json!("2016-02-01T08:28:00Z"), "expiry {:?}", json["expiry"]);
    assert_eq!(json["user"], json!("BuyerOrSeller|Sample_Seller|Seller"), "user {:?}", json["user"]);
    assert_eq!(json["currency"], json!("VAC"), "currency {:?}", json["currency"]);
    assert_eq!(json["type"], json!("English|0|0|0"), "type {:?}", json["type"]);
}

#[test]
fn test_jwt_payload_decoding() {
    // Buyer or seller payload
    let payload = general_purpose::STANDARD
        .encode(r#"{"sub":"a1","name":"Test","u_typ":"0"}"#);
    let user = decode_jwt_user(&payload).unwrap();
    assert_eq!(user.to_string(), "BuyerOrSeller|a1|Test");

    // Support payload
    let payload = general_purpose::STANDARD
        .encode(r#"{"sub":"a2","u_typ":"1"}"#);
    let user = decode_jwt_user(&payload).unwrap();
    assert_eq!(user.to_string(), "Support|a2");

    // Unknown user type is rejected
    let payload = general_purpose::STANDARD
        .encode(r#"{"sub":"a3","u_typ":"2"}"#);
    assert!(decode_jwt_user(&payload).is_err());

    // Garbage payloads are rejected
    assert!(decode_jwt_user("not-base64!").is_err());
    let payload = general_purpose::STANDARD.encode("not json");
    assert!(decode_jwt_user(&payload).is_err());
}

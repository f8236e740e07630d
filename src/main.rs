use std::io::{Error, ErrorKind};

use log::info;

use auction_engine::domain::{events_to_repository, Event};
use auction_engine::persistence::json_file::{read_events, write_events};
use auction_engine::web::app::run_app;

const DEFAULT_EVENTS_FILE: &str = "tmp/events.jsonl";
const DEFAULT_PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let events_file = std::env::var("AUCTION_EVENTS_FILE")
        .unwrap_or_else(|_| DEFAULT_EVENTS_FILE.to_string());
    let port = std::env::var("AUCTION_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let events = read_events(&events_file)
        .map_err(|err| Error::new(ErrorKind::InvalidData, err.to_string()))?;
    info!("Replayed {} events from {}", events.len(), events_file);

    let repository = events_to_repository(&events);

    let on_event = Box::new(move |event: &Event| write_events(&events_file, std::slice::from_ref(event)));

    run_app(repository, on_event, port).await
}

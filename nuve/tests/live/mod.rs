use std::env;

use log::warn;
use nuve::{Client, Config, Result, Room};
use nuve_core::{Context, OsEnv};

fn init_live_client() -> Option<Client> {
    super::init_logger();
    let _ = dotenv::dotenv();
    if env::var("NUVE_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let config = Config::new().from_env(&Context::new().with_env(OsEnv));
    Some(Client::new(config).expect("client must build from env"))
}

#[tokio::test]
async fn test_live_list_rooms() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("NUVE_TEST is not set, skipped");
        return Ok(());
    };

    let body = client.get_rooms().await?;
    let rooms: Vec<Room> = serde_json::from_slice(&body)?;
    for room in rooms {
        log::info!("room: {room}");
    }
    Ok(())
}

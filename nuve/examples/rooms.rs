//! List the rooms of a service and issue a token for the first one.
//!
//! ```shell
//! NUVE_HOST=http://localhost:3000 NUVE_SERVICE_ID=... NUVE_SERVICE_KEY=... \
//!     cargo run --example rooms -- alice presenter
//! ```

use anyhow::Result;
use nuve::{decode_token, Client, Config, Room};
use nuve_core::{Context, OsEnv};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let user = args.next().unwrap_or_else(|| "guest".to_string());
    let role = args.next().unwrap_or_else(|| "viewer".to_string());

    let config = Config::new().from_env(&Context::new().with_env(OsEnv));
    let client = Client::new(config)?;

    let rooms: Vec<Room> = serde_json::from_slice(&client.get_rooms().await?)?;
    for room in &rooms {
        println!("{room}");
    }

    let Some(room) = rooms.first() else {
        println!("no room to join");
        return Ok(());
    };

    let token = decode_token(&client.create_token(&room.id, &user, &role).await?)?;
    println!("token for {user} in {}: {}", room.name, String::from_utf8_lossy(&token));
    Ok(())
}

//! Seeds a fresh homeserver with the community space and its rooms
//!
//! The flow is strictly sequential: log in, create the space, then for each
//! room definition create the room and link it both ways with the space.
//! Login and space creation are fatal. A room that fails is logged and the
//! loop moves on. Nothing is retried and nothing is checked for existence
//! first, so every run creates a new space.

use crate::catalog::{self, RoomDefinition, SpaceDefinition};
use crate::config::BootstrapConfig;
use crate::matrix::{Homeserver, StateEvent};
use tracing::{info, warn};

mod error;
mod report;


pub use error::BootstrapError;
pub use report::{BootstrapReport, RoomOutcome, RoomStatus};

/// Run the bootstrap with the built-in space and room catalog
pub async fn bootstrap<H: Homeserver>(
    homeserver: &mut H,
    config: &BootstrapConfig,
) -> Result<BootstrapReport, BootstrapError> {
    bootstrap_with(homeserver, config, &catalog::SPACE, &catalog::ROOMS).await
}

/// Run the bootstrap with a caller-supplied space and room list
pub async fn bootstrap_with<H: Homeserver>(
    homeserver: &mut H,
    config: &BootstrapConfig,
    space: &SpaceDefinition,
    rooms: &[RoomDefinition],
) -> Result<BootstrapReport, BootstrapError> {
    let user_id = config.user_id();

    info!("Logging in as {} at {}...", user_id, config.homeserver);
    let session = homeserver
        .login(&user_id, &config.admin_password)
        .await
        .map_err(BootstrapError::Login)?;
    info!("Logged in successfully");

    info!("Creating space: {}", space.name);
    let space_id = homeserver
        .create_room(&space.create_request())
        .await
        .map_err(BootstrapError::SpaceCreation)?;
    info!(space_id = %space_id, "Space created");

    let mut outcomes = Vec::with_capacity(rooms.len());
    for room in rooms {
        outcomes.push(seed_room(homeserver, room, &space_id, &config.server_name).await);
    }

    Ok(BootstrapReport {
        user_id: session.user_id,
        space_id,
        rooms: outcomes,
    })
}

/// Create one room and write both halves of its space link
async fn seed_room<H: Homeserver>(
    homeserver: &H,
    room: &RoomDefinition,
    space_id: &str,
    server_name: &str,
) -> RoomOutcome {
    info!("Creating room: #{}", room.name);

    let room_id = match homeserver.create_room(&room.create_request()).await {
        Ok(room_id) => room_id,
        Err(e) => {
            warn!(room = room.name, error = %e, "Failed to create room");
            return RoomOutcome {
                name: room.name.to_string(),
                status: RoomStatus::Failed { error: e.to_string() },
            };
        }
    };
    info!(room_id = %room_id, "Room created");

    // Both writes are always attempted; a failed child link does not skip the parent.
    let child = homeserver
        .put_state(space_id, &StateEvent::space_child(&room_id, server_name))
        .await;
    let parent = homeserver
        .put_state(&room_id, &StateEvent::space_parent(space_id, server_name))
        .await;

    let errors: Vec<String> = [
        child.err().map(|e| format!("space child link: {}", e)),
        parent.err().map(|e| format!("space parent link: {}", e)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let status = if errors.is_empty() {
        info!("Added {} to space", room.name);
        RoomStatus::Linked { room_id }
    } else {
        let error = errors.join("; ");
        warn!(room = room.name, error = %error, "Failed to link room to space");
        RoomStatus::Unlinked { room_id, error }
    };

    RoomOutcome {
        name: room.name.to_string(),
        status,
    }
}

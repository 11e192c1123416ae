use crate::model::{ids::PlayerHandle, player::PlayerProfile, roster::Roster};

use self::async_data::Responder;

pub mod async_data;
pub mod list;
pub mod navigation;
pub mod paginator;
pub mod profile;

/// Where controllers get their data from. Each call must answer through the responder exactly once.
pub trait PlayerSource {
    fn fetch_roster(&self, responder: Responder<Roster>);

    fn fetch_profile(&self, handle: PlayerHandle, responder: Responder<Option<PlayerProfile>>);
}

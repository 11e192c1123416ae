use std::{fmt, sync::Arc, thread};

use log::{info, warn};

use crate::{
    config::Config,
    controller::{async_data::Responder, PlayerSource},
    model::{ids::PlayerHandle, player::PlayerProfile, roster::Roster},
    service::chessapi::{
        client::{ChessApiClient, ClientInitError, ClientRequestType, RequestError},
        parsing::{player::parse_profile, roster::parse_roster, ParsingError},
    },
};

pub struct DataManager {
    client: Arc<ChessApiClient>,
}

impl DataManager {
    pub fn new(config: &Config) -> Result<Self, DataManagerInitError> {
        let client = ChessApiClient::new(config)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    // Runs the fetch on its own thread and reports through the responder
    pub fn async_wrapper<T, F>(&self, responder: Responder<T>, fetch_fn: F)
    where
        T: Send + 'static,
        F: FnOnce() -> DataRetrievalResult<T> + Send + 'static,
    {
        thread::spawn(move || {
            let result = fetch_fn();
            responder.send(result);
        });
    }

    pub fn get_roster(&self, responder: Responder<Roster>) {
        let client = Arc::clone(&self.client);
        let token = responder.token();

        self.async_wrapper(responder, move || {
            info!("Fetching roster (request #{})", token);
            let roster_json = client.request(ClientRequestType::Roster).map_err(log_failure)?;
            let roster = parse_roster(&roster_json).map_err(log_failure)?;
            info!("Roster fetched: {} players (request #{})", roster.len(), token);
            Ok(roster)
        })
    }

    pub fn get_profile(&self, handle: PlayerHandle, responder: Responder<Option<PlayerProfile>>) {
        let client = Arc::clone(&self.client);
        let token = responder.token();

        self.async_wrapper(responder, move || {
            info!("Fetching profile of {} (request #{})", handle, token);
            let profile_json = client
                .request(ClientRequestType::Profile(handle.clone()))
                .map_err(log_failure)?;
            let profile = parse_profile(&profile_json).map_err(log_failure)?;
            if profile.is_none() {
                info!("No profile found for {} (request #{})", handle, token);
            }
            Ok(profile)
        })
    }
}

impl PlayerSource for DataManager {
    fn fetch_roster(&self, responder: Responder<Roster>) {
        self.get_roster(responder)
    }

    fn fetch_profile(&self, handle: PlayerHandle, responder: Responder<Option<PlayerProfile>>) {
        self.get_profile(handle, responder)
    }
}

fn log_failure<E: Into<DataRetrievalError>>(error: E) -> DataRetrievalError {
    let error = error.into();
    warn!("{}", error);
    error
}

pub type DataRetrievalResult<T> = Result<T, DataRetrievalError>;

#[derive(Debug)]
pub enum DataManagerInitError {
    ClientFailed(ClientInitError),
}

impl fmt::Display for DataManagerInitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataManagerInitError::ClientFailed(err) => write!(f, "Client initialization error: {}", err),
        }
    }
}

impl From<ClientInitError> for DataManagerInitError {
    fn from(error: ClientInitError) -> Self {
        Self::ClientFailed(error)
    }
}

#[derive(Debug)]
pub enum DataRetrievalError {
    Client(RequestError),
    Parsing(ParsingError),
    Abandoned,
}

impl fmt::Display for DataRetrievalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataRetrievalError::Client(err) => write!(f, "{}", err),
            DataRetrievalError::Parsing(err) => write!(f, "Parsing error: {}", err),
            DataRetrievalError::Abandoned => write!(f, "Data fetch failed: request was abandoned"),
        }
    }
}

impl From<RequestError> for DataRetrievalError {
    fn from(error: RequestError) -> Self {
        Self::Client(error)
    }
}

impl From<ParsingError> for DataRetrievalError {
    fn from(error: ParsingError) -> Self {
        Self::Parsing(error)
    }
}

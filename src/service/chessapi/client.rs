use std::{
    fmt,
    fs::{self, File},
    io::{self, Read, Write},
    path::PathBuf,
};

use json::JsonValue;
use log::{debug, warn};
use reqwest::{blocking::Client, StatusCode};

use crate::{config::Config, model::ids::PlayerHandle};

const TITLE: &str = "GM";

pub struct ChessApiClient {
    client: Client,
    base_url: String,
    data_dir: PathBuf,
    load_local_json: bool,
    write_json: bool,
}

impl ChessApiClient {
    pub fn new(config: &Config) -> Result<Self, ClientInitError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("gmwiki/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            data_dir: config.data_dir.clone(),
            load_local_json: config.load_local,
            write_json: config.store_responses,
        })
    }

    pub fn url(&self, request_type: &ClientRequestType) -> String {
        match request_type {
            ClientRequestType::Roster => format!("{}/titled/{}", self.base_url, TITLE),
            ClientRequestType::Profile(handle) => {
                format!("{}/player/{}", self.base_url, urlencoding::encode(handle.as_str()))
            }
        }
    }

    /// Fetches one resource. Successful responses with an empty body come back as `JsonValue::Null`.
    pub fn request(&self, request_type: ClientRequestType) -> Result<JsonValue, RequestError> {
        if self.load_local_json {
            return self.read_local(&request_type);
        }

        let url = self.url(&request_type);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| RequestError::ClientFailed(request_type.clone(), err))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|err| RequestError::ClientFailed(request_type.clone(), err))?;

        let json = decode_response(&request_type, status, &text)?;

        if self.write_json {
            if let Err(err) = self.store_local(&request_type, &json) {
                warn!("Could not store response for {:?}: {}", request_type, err);
            }
        }

        Ok(json)
    }

    fn local_path(&self, request_type: &ClientRequestType) -> PathBuf {
        self.data_dir.join(format!("{}.json", request_type.file_stem()))
    }

    fn read_local(&self, request_type: &ClientRequestType) -> Result<JsonValue, RequestError> {
        let path = self.local_path(request_type);
        debug!("Reading {}", path.display());

        let mut file = File::open(&path)?;
        let mut buf = String::new();
        file.read_to_string(&mut buf)?;
        if buf.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        Ok(json::parse(&buf)?)
    }

    fn store_local(&self, request_type: &ClientRequestType, json: &JsonValue) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let mut file = File::create(self.local_path(request_type))?;
        file.write_all(json.pretty(2).as_bytes())
    }
}

fn decode_response(request_type: &ClientRequestType, status: StatusCode, body: &str) -> Result<JsonValue, RequestError> {
    if !status.is_success() {
        warn!("{:?} returned HTTP {}", request_type, status);
        return Err(RequestError::InvalidResponse(request_type.clone(), status.as_u16()));
    }

    if body.trim().is_empty() {
        return Ok(JsonValue::Null);
    }

    Ok(json::parse(body)?)
}

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum ClientRequestType {
    Roster,
    Profile(PlayerHandle),
}

impl ClientRequestType {
    fn description(&self) -> &'static str {
        match self {
            ClientRequestType::Roster => "grandmasters",
            ClientRequestType::Profile(_) => "player profile",
        }
    }

    fn file_stem(&self) -> String {
        match self {
            ClientRequestType::Roster => "roster".to_string(),
            ClientRequestType::Profile(handle) => format!("player_{}", urlencoding::encode(handle.as_str())),
        }
    }
}

#[derive(Debug)]
pub enum ClientInitError {
    HttpClientCreation(reqwest::Error),
}

impl fmt::Display for ClientInitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientInitError::HttpClientCreation(err) => write!(f, "Failed to create HTTP client: {}", err),
        }
    }
}

impl From<reqwest::Error> for ClientInitError {
    fn from(error: reqwest::Error) -> Self {
        Self::HttpClientCreation(error)
    }
}

#[derive(Debug)]
pub enum RequestError {
    ClientFailed(ClientRequestType, reqwest::Error),
    InvalidResponse(ClientRequestType, u16),
    ParsingFailed(json::Error),
    LocalFileError(io::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestError::ClientFailed(req_type, err) => {
                write!(f, "Failed to fetch {}: {}", req_type.description(), err)
            }
            RequestError::InvalidResponse(req_type, status) => {
                write!(f, "Failed to fetch {} (HTTP {})", req_type.description(), status)
            }
            RequestError::ParsingFailed(err) => write!(f, "Failed to parse JSON response: {}", err),
            RequestError::LocalFileError(err) => write!(f, "Local file error: {}", err),
        }
    }
}

impl From<json::Error> for RequestError {
    fn from(error: json::Error) -> Self {
        RequestError::ParsingFailed(error)
    }
}

impl From<io::Error> for RequestError {
    fn from(error: io::Error) -> Self {
        RequestError::LocalFileError(error)
    }
}

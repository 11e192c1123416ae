use std::fmt;

use crate::model::ids::PlayerHandle;

const PROFILE_PREFIX: &str = "/profile/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Profile(PlayerHandle),
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Ok(Route::List);
        }

        let Some(param) = path.strip_prefix(PROFILE_PREFIX) else {
            return Err(RouteError::Unknown(path.to_string()));
        };
        let param = param.trim_end_matches('/');
        if param.contains('/') {
            return Err(RouteError::Unknown(path.to_string()));
        }

        let decoded = urlencoding::decode(param).map_err(|_| RouteError::InvalidParameter(param.to_string()))?;
        let handle = PlayerHandle::new(decoded.into_owned()).map_err(|_| RouteError::MissingParameter)?;
        Ok(Route::Profile(handle))
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Profile(handle) => format!("{}{}", PROFILE_PREFIX, urlencoding::encode(handle.as_str())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Request from a controller to switch views; the shell decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    Open(Route),
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RouteError {
    Unknown(String),
    MissingParameter,
    InvalidParameter(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RouteError::Unknown(path) => write!(f, "No view for path: {}", path),
            RouteError::MissingParameter => write!(f, "Profile path needs a player handle"),
            RouteError::InvalidParameter(param) => write!(f, "Invalid player handle in path: {}", param),
        }
    }
}

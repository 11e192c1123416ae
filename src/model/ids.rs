use std::fmt::{self, Display};

/// Chess.com username, used as roster entry and as route parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerHandle(String);

impl PlayerHandle {
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidHandle> {
        let value = value.into();
        if value.is_empty() {
            return Err(InvalidHandle);
        }
        Ok(PlayerHandle(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased first character, shown where there is no avatar.
    pub fn initial(&self) -> String {
        self.0.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
    }
}

impl Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for PlayerHandle {
    type Error = InvalidHandle;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        PlayerHandle::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidHandle;

impl Display for InvalidHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player handle must not be empty")
    }
}

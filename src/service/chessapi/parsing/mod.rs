use core::fmt;

pub mod player;
pub mod roster;

#[derive(Debug, PartialEq)]
pub enum ParsingError {
    InvalidType(String),
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParsingError::InvalidType(field) => write!(f, "Invalid type for field: {}", field),
        }
    }
}

pub mod ids;
pub mod player;
pub mod roster;

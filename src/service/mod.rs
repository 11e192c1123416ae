pub mod chessapi;
pub mod data_manager;

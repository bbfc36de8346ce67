use thiserror::Error;

/// Errors that can occur while setting up or playing simulated games
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Player factory produced no players")]
    NoPlayers,

    #[error("No active players left to take a turn")]
    NoActivePlayers,
}

/// Convenience Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimulationError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Command not implemented: {0}")]
    NotImplemented(String),

    #[error("DataWedge API error: {0}")]
    Api(#[from] datawedge_api::ApiError),

    #[error("Event manager error: {0}")]
    EventManager(#[from] datawedge_event_manager::EventManagerError),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

//! Shared error type across roomcast crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Room identifier failed validation.
    InvalidRoom,
    /// Inbound payload missing fields or ill-typed.
    MalformedPayload,
    /// Operation attempted in the wrong session state.
    UnexpectedState,
    /// Presence store unreachable (retryable).
    StoreUnavailable,
    /// Auth failed.
    AuthFailed,
    /// Payload too large.
    PayloadTooLarge,
    /// Config rejected at startup.
    InvalidConfig,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses and close reasons.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidRoom => "INVALID_ROOM",
            ClientCode::MalformedPayload => "MALFORMED_PAYLOAD",
            ClientCode::UnexpectedState => "UNEXPECTED_STATE",
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::InvalidConfig => "INVALID_CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RoomcastError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum RoomcastError {
    #[error("invalid room identifier: {0}")]
    InvalidRoomIdentifier(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("unexpected state: {0}")]
    UnexpectedState(&'static str),
    #[error("presence store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("auth failed")]
    AuthFailed,
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl RoomcastError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            RoomcastError::InvalidRoomIdentifier(_) => ClientCode::InvalidRoom,
            RoomcastError::MalformedPayload(_) => ClientCode::MalformedPayload,
            RoomcastError::UnexpectedState(_) => ClientCode::UnexpectedState,
            RoomcastError::StoreUnavailable(_) => ClientCode::StoreUnavailable,
            RoomcastError::AuthFailed => ClientCode::AuthFailed,
            RoomcastError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            RoomcastError::InvalidConfig(_) => ClientCode::InvalidConfig,
            RoomcastError::Internal(_) => ClientCode::Internal,
        }
    }

    /// WebSocket close code used when this error ends a live session.
    ///
    /// Rejections that happen before the upgrade (invalid room, bad ticket)
    /// are HTTP responses instead; the codes here cover the post-accept
    /// paths.
    pub fn close_code(&self) -> u16 {
        match self {
            RoomcastError::MalformedPayload(_) => 1008,
            RoomcastError::UnexpectedState(_) => 1002,
            RoomcastError::PayloadTooLarge => 1009,
            RoomcastError::StoreUnavailable(_) => 1013,
            RoomcastError::InvalidRoomIdentifier(_) | RoomcastError::AuthFailed => 1008,
            RoomcastError::InvalidConfig(_) | RoomcastError::Internal(_) => 1011,
        }
    }
}

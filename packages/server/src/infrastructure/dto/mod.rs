//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event frames (inbound and outbound)
//! - `http`: HTTP API request/response bodies
//! - `conversion`: DTO <-> domain conversion

pub mod conversion;
pub mod http;
pub mod websocket;

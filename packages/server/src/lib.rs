//! Parley signaling relay library.
//!
//! This library provides a WebSocket relay that forwards WebRTC negotiation
//! messages between peers and fans out room messages, translated per member.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// wiring
pub mod bootstrap;
pub mod config;

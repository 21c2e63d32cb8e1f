//! HTTP handlers and router.

pub mod auth;
pub mod extract;
pub mod rides;
pub mod server;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

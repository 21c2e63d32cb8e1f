//! Ride-hailing backend: user registration/login and the
//! requested → ongoing → completed ride lifecycle over SQLite.

pub mod api;
pub mod config;
pub mod db;
pub mod error;

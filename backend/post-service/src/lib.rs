//! Post Service Library
//!
//! Handles post authoring, media attachment, friendships, and engagement
//! (comments and likes) for the Ripple social platform. The HTTP layer,
//! authentication, and dependency wiring live outside this crate; everything
//! here is reachable through the service structs and the repository seam.
//!
//! # Modules
//!
//! - `models`: Storage entities for posts, media, users, friendships
//! - `dto`: Transfer records exposed to callers
//! - `mapper`: Pure conversion between transfer records and entities
//! - `repository`: Persistent repository trait and Postgres implementation
//! - `services`: Business logic layer
//! - `error`: Error types and handling
//! - `config`: Configuration management
pub mod config;
pub mod dto;
pub mod error;
pub mod mapper;
pub mod models;
pub mod repository;
pub mod services;

pub use config::{Config, PictureKindPolicy};
pub use error::{AppError, Result};

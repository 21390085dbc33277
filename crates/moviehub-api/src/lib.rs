//! API client library for moviehub.
//!
//! Provides a client for the OMDB (Open Movie Database) API.

/// OMDB API client.
pub mod omdb;

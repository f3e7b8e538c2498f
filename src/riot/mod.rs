//! Riot module - Gateway implementation for the Riot Games API

pub mod auth;
pub mod client;
pub mod messages;
pub mod rest;

pub use client::RiotGateway;
pub use rest::RiotRestClient;

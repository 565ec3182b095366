pub mod api;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod geo;
pub mod places;
pub mod server;
pub mod store;

pub mod simulation;

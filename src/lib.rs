//! Pokedex TUI - paginated and searchable PokeAPI catalog
//!
//! This library exposes the application's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod query;
pub mod reducer;
pub mod runner;
pub mod sprite;
pub mod state;

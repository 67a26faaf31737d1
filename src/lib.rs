//! # Connect Four Minimax
//!
//! A Connect Four engine: a gravity-aware board, a two-player game loop, and a
//! depth-limited minimax search with optional alpha-beta pruning behind the
//! computer opponent.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, marks, state machine, match loop
//! - [`ai`] — Player trait, human/random/minimax players, heuristics, search
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;

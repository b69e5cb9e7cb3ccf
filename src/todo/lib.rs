//! # Todo Architecture
//!
//! Todo is an interactive to-do list manager. The library holds everything
//! except terminal handling, which lives in the binary.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Command loop, prompts, rendering, signal handling        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the task and category repositories                  │
//! │  - Thin facade over commands, closes storage on shutdown    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation and business rules                            │
//! │  - Returns CmdResult values, never prints                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository (repository.rs)                                 │
//! │  - Id assignment, domain "not found" errors                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Generic DataStore<T> trait                               │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence
//!
//! Each collection lives in memory for the whole session and is written back
//! to `<data dir>/<collection>.json` when the API is closed. See [`store`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for tasks, categories and config
//! - [`repository`]: Identity and error policy over a store
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Task`, `Category`, `Status` and the `Record` trait
//! - [`config`]: Configuration file
//! - [`init`]: Data directory resolution and startup wiring
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod logging;
pub mod model;
pub mod repository;
pub mod store;

//! # Core Application Logic
//!
//! This module contains TEA's screen logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effects
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Content   │
//!     │  Adapter   │                          │ providers  │
//!     │ (ratatui)  │                          │ (reqwest)  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`course_list`], [`overview`], [`lesson`]: one controller per screen
//! - [`route`]: Screen addresses and per-screen loading state
//! - [`services`]: What controllers may ask of the outside world
//! - [`language`]: Code snippet languages
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod course_list;
pub mod language;
pub mod lesson;
pub mod overview;
pub mod route;
pub mod services;
pub mod state;

pub use action::{Action, Effect, update};
pub use state::App;

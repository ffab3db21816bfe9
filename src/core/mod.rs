//! # Core Application Logic
//!
//! This module contains CareHub's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Outbox   │      │  Fixtures  │
//!     │  Adapter   │      │ (delivery) │      │   (JSON)   │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`model`]: conversations, messages, audiences
//! - [`inbox`]: the store plus filter, selection and composer
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and the `update()` reducer

pub mod action;
pub mod composer;
pub mod config;
pub mod fixtures;
pub mod inbox;
pub mod model;
pub mod outbox;
pub mod route;
pub mod state;

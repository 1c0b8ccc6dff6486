//! # Order Timeline
//!
//! Keeps a user's purchase history in sync with a live feed and drives the animated
//! order timeline built on top of it.
//!
//! ## Core Components
//!
//! - **[model]**: raw feed records and the canonical [`Order`](model::Order)
//! - **[normalizer]**: raw record to order, plus derived display fields and formatting
//! - **[sync]**: the feed seam, the synchronizer and its snapshots
//! - **[disclosure]**: per-row expand/collapse state with animated heights
//! - **[tracking]**: the order lifecycle state machine and its progress animation
//! - **[presentation]**: row, overlay and detail view-models
//! - **[screen]** / **[clients]**: the screen actor and its type-safe client
//! - **[lifecycle]**: starting and stopping a [`TimelineSystem`](lifecycle::TimelineSystem)
//! - **[config]**: [`TimelineConfig`](config::TimelineConfig) and TOML loading

pub mod clients;
pub mod config;
pub mod disclosure;
pub mod lifecycle;
pub mod model;
pub mod normalizer;
pub mod presentation;
pub mod screen;
pub mod sync;
pub mod tracking;

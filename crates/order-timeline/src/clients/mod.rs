//! Type-safe client wrappers.

pub mod screen_client;

pub use screen_client::ScreenClient;

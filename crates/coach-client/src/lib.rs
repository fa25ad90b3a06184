pub mod api;
pub mod config;
pub mod coordinator;

pub use coordinator::{Played, Rejection, TurnCoordinator};

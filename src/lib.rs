//! State model for a personal wellness companion: mood journaling, care
//! tracking, meal suggestions, community challenges and the user profile.
//!
//! Each screen is a [`store::Screen`] whose reducer is a pure function of the
//! current state, an action and an injected [`capabilities::Context`].

pub mod capabilities;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod notice;
pub mod screens;
pub mod seed;
pub mod session;
pub mod store;

pub use capabilities::{Clock, Context, IdGenerator};
pub use session::{DashboardSummary, ScreenName, Session};
pub use store::{Screen, Store};

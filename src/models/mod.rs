//! Timetabling domain models.
//!
//! Core data types describing the search space: class sections
//! ([`Activity`]), the rooms they can occupy ([`Room`]), and the full
//! domain definition ([`Schedule`]). All three are loaded once and stay
//! read-only for the lifetime of an optimization run; candidate solutions
//! live in [`crate::ga`].

mod activity;
mod room;
mod schedule;

pub use activity::{Activity, ActivityId};
pub use room::Room;
pub use schedule::Schedule;

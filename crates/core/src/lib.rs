//! Domain types shared by the SlotSync database and API crates.

pub mod datetime;
pub mod errors;
pub mod models;

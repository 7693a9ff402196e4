//! mockall doubles for the repository traits, used by the API handler tests.

pub mod repositories;

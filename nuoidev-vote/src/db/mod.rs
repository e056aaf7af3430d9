//! Database queries for the vote service

pub mod profiles;
pub mod settings;
pub mod votes;

//! Command handlers

pub mod config;
pub mod sentence;
pub mod status;

// src/application/commands/mod.rs
pub mod portfolios;
pub mod users;

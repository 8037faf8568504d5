// src/domain/mod.rs
pub mod errors;
pub mod portfolio;
pub mod user;

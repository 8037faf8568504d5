// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod repos;
pub mod security;
pub mod storage;
pub mod time;

pub use repos::{InMemoryPortfolioRepo, InMemoryUserRepo};
pub use security::PlainPasswordHasher;
pub use storage::RecordingFileStore;
pub use time::{FixedClock, fixed_now};

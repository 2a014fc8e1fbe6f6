// src/handlers/mod.rs
pub mod analytics;
pub mod api;
pub mod error;
pub mod estimate;
pub mod pages;

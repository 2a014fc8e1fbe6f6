// src/services/mod.rs
pub mod backend;
pub mod chart;
pub mod currency;
pub mod insights;
pub mod market;
pub mod roi;
pub mod svg;

// src/views/mod.rs
pub mod home;
pub mod layout;
pub mod modals;
pub mod notice;

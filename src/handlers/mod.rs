// src/handlers/mod.rs
pub mod auth;
pub mod index;
pub mod servers;
pub mod status;

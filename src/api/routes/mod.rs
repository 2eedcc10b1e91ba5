//! API Route Handlers

pub mod data;
pub mod health;
pub mod pages;

// src/core/mod.rs

pub mod converter;
pub mod engine;
pub mod hash;
pub mod ranked;
pub mod table;
pub mod types;

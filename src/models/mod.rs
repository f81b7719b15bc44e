// src/models/mod.rs
pub mod hostel;
pub mod stats;
pub mod student;
pub mod user;

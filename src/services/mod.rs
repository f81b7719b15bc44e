// src/services/mod.rs
pub mod auth_service;
pub mod export_service;
pub mod hostel_service;
pub mod qr_service;
pub mod stats_service;
pub mod student_service;
pub mod user_service;

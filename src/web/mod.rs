// src/web/mod.rs
pub mod auth_handlers;
pub mod hostel_handlers;
pub mod mw_admin;
pub mod mw_auth;
pub mod routes;
pub mod stats_handlers;
pub mod student_handlers;
pub mod validation;

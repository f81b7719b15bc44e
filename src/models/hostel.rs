// src/models/hostel.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Hostel {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub capacity: i64,
}

// Body of POST /api/hostel/create
#[derive(Debug, Deserialize)]
pub struct CreateHostelForm {
    pub name: String,
    pub capacity: i64,
}

// Body of the endpoints that take a hostel id-or-name
#[derive(Debug, Deserialize)]
pub struct HostelRef {
    #[serde(default)]
    pub hostel: String,
}

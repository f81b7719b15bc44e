// src/models/stats.rs
use serde::Serialize;
use sqlx::FromRow;

/// Point-in-time aggregate returned by GET /api/student/stats.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    #[serde(rename = "totalStudents")]
    pub total_students: i64,
    pub hostels: Vec<HostelOccupancy>,
    #[serde(rename = "byDept")]
    pub by_dept: Vec<DeptCount>,
    #[serde(rename = "byBatch")]
    pub by_batch: Vec<BatchCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostelOccupancy {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub capacity: i64,
    pub occupied: i64,
    pub vacant: i64,
}

// Result row of the GROUP BY hostel_id pass
#[derive(Debug, Clone, FromRow)]
pub struct HostelCount {
    pub hostel_id: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct DeptCount {
    #[serde(rename = "_id")]
    pub dept: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct BatchCount {
    #[serde(rename = "_id")]
    pub batch: i64,
    pub count: i64,
}

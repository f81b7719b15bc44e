// src/models/student.rs
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Student profile row from the 'students' table.
// JSON names follow what the dashboard already consumes (_id, qrCode, hostel, user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub cms_id: i64,
    pub room_no: String,
    pub batch: i64,
    pub dept: String,
    pub course: String,
    pub email: String,
    pub father_name: String,
    pub contact: String,
    pub address: String,
    pub dob: NaiveDate,
    pub cnic: String,
    #[serde(rename = "qrCode")]
    pub qr_code: Option<String>,
    #[serde(rename = "hostel")]
    pub hostel_id: String,
    #[serde(rename = "user")]
    pub user_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Every mutable profile field, plus the hostel id-or-name.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentFields {
    pub name: String,
    pub cms_id: i64,
    pub room_no: String,
    pub batch: i64,
    pub dept: String,
    pub course: String,
    pub email: String,
    pub father_name: String,
    pub contact: String,
    pub address: String,
    pub dob: NaiveDate,
    pub cnic: String,
    pub hostel: String,
}

// Body of POST /api/student/register-student
#[derive(Debug, Deserialize)]
pub struct RegisterStudentForm {
    #[serde(flatten)]
    pub fields: StudentFields,
    pub password: String,
}

// Body of POST /api/student/update-student (full replacement, no patching)
#[derive(Debug, Deserialize)]
pub struct UpdateStudentForm {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: StudentFields,
}

// Body of POST /api/student/delete-student
#[derive(Debug, Deserialize)]
pub struct StudentIdForm {
    #[serde(alias = "_id")]
    pub id: String,
}

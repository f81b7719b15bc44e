// src/services/export_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{hostel::Hostel, student::Student},
};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;

/// Column order of the exported sheet.
pub const CSV_FIELDS: [&str; 13] = [
    "name",
    "cms_id",
    "room_no",
    "batch",
    "dept",
    "course",
    "email",
    "father_name",
    "contact_no",
    "address",
    "d_o_b",
    "cnic_no",
    "hostel_name",
];

// Field order must match CSV_FIELDS
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    cms_id: i64,
    room_no: &'a str,
    batch: i64,
    dept: &'a str,
    course: &'a str,
    email: &'a str,
    father_name: &'a str,
    contact_no: String,
    address: &'a str,
    d_o_b: String,
    cnic_no: String,
    hostel_name: &'a str,
}

/// Char-indexed slice that clamps out-of-range bounds instead of panicking.
fn slice_chars(s: &str, start: usize, end: Option<usize>) -> String {
    let len = s.chars().count();
    let end = end.unwrap_or(len).min(len);
    let start = start.min(end);
    s.chars().skip(start).take(end - start).collect()
}

/// "Mar 05 2001" style date of birth.
pub fn format_dob(dob: NaiveDate) -> String {
    dob.format("%b %d %Y").to_string()
}

/// 5-7-rest grouping of a 13-digit national id: "35202-1234567-1".
pub fn format_cnic(cnic: &str) -> String {
    format!(
        "{}-{}-{}",
        slice_chars(cnic, 0, Some(5)),
        slice_chars(cnic, 5, Some(12)),
        slice_chars(cnic, 12, None)
    )
}

/// Replaces the stored leading digit with the +92 country code.
pub fn format_contact(contact: &str) -> String {
    format!("+92 {}", slice_chars(contact, 1, None))
}

/// Serializes every student of `hostel` as one row, header first.
pub fn students_to_csv(hostel: &Hostel, students: &[Student]) -> AppResult<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_FIELDS)?;
    for student in students {
        writer.serialize(CsvRow {
            name: &student.name,
            cms_id: student.cms_id,
            room_no: &student.room_no,
            batch: student.batch,
            dept: &student.dept,
            course: &student.course,
            email: &student.email,
            father_name: &student.father_name,
            contact_no: format_contact(&student.contact),
            address: &student.address,
            d_o_b: format_dob(student.dob),
            cnic_no: format_cnic(&student.cnic),
            hostel_name: &hostel.name,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::CsvError(e.into_error().into()))?;
    let mut csv = String::from_utf8(bytes).map_err(|e| {
        tracing::error!("CSV output was not UTF-8: {}", e);
        AppError::InternalServerError
    })?;

    if csv.ends_with('\n') {
        csv.pop();
    }
    tracing::debug!("Exported {} students of hostel '{}'.", students.len(), hostel.name);
    Ok(csv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hostel() -> Hostel {
        Hostel { id: "h1".into(), name: "Rumi".into(), capacity: 10 }
    }

    fn student(name: &str, cms_id: i64) -> Student {
        Student {
            id: format!("s{cms_id}"),
            name: name.into(),
            cms_id,
            room_no: "101".into(),
            batch: 2022,
            dept: "SEECS".into(),
            course: "BSCS".into(),
            email: format!("{cms_id}@example.com"),
            father_name: "Tariq".into(),
            contact: "03001234567".into(),
            address: "Street 1, Islamabad".into(),
            dob: NaiveDate::from_ymd_opt(2001, 3, 5).unwrap(),
            cnic: "3520212345671".into(),
            qr_code: None,
            hostel_id: "h1".into(),
            user_id: "u1".into(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn display_fields_use_fixed_offsets() {
        assert_eq!(format_cnic("3520212345671"), "35202-1234567-1");
        assert_eq!(format_contact("03001234567"), "+92 3001234567");
        assert_eq!(
            format_dob(NaiveDate::from_ymd_opt(2001, 3, 5).unwrap()),
            "Mar 05 2001"
        );
    }

    #[test]
    fn short_values_do_not_panic() {
        assert_eq!(format_cnic("123"), "123--");
        assert_eq!(format_contact(""), "+92 ");
    }

    #[test]
    fn one_row_per_student_in_fixed_column_order() {
        let csv = students_to_csv(&hostel(), &[student("Ali", 1), student("Sara", 2)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "\"name\",\"cms_id\",\"room_no\",\"batch\",\"dept\",\"course\",\"email\",\"father_name\",\"contact_no\",\"address\",\"d_o_b\",\"cnic_no\",\"hostel_name\""
        );
        assert_eq!(
            lines[1],
            "\"Ali\",\"1\",\"101\",\"2022\",\"SEECS\",\"BSCS\",\"1@example.com\",\"Tariq\",\"+92 3001234567\",\"Street 1, Islamabad\",\"Mar 05 2001\",\"35202-1234567-1\",\"Rumi\""
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn leading_zeros_survive_quoting() {
        let mut s = student("Ali", 1);
        s.room_no = "007".into();
        let csv = students_to_csv(&hostel(), &[s]).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert!(row.starts_with("\"Ali\",\"1\",\"007\","));
    }

    #[test]
    fn empty_hostel_still_has_header() {
        let csv = students_to_csv(&hostel(), &[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("\"name\""));
    }
}

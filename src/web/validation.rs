// src/web/validation.rs
use crate::{error::FieldError, models::student::StudentFields};

const MIN_PASSWORD_LEN: usize = 8;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

/// `local@domain.tld` with no whitespace.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
        }
        None => false,
    }
}

/// Shape checks shared by registration and update. Returns every failure.
pub fn student_fields(fields: &StudentFields) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let required = [
        ("name", &fields.name),
        ("room_no", &fields.room_no),
        ("dept", &fields.dept),
        ("course", &fields.course),
        ("father_name", &fields.father_name),
        ("address", &fields.address),
        ("hostel", &fields.hostel),
    ];
    for (path, value) in required {
        if is_blank(value) {
            errors.push(FieldError::at(path, format!("{path} is required")));
        }
    }

    if fields.cms_id <= 0 {
        errors.push(FieldError::at("cms_id", "Enter a valid CMS ID"));
    }
    if fields.batch <= 0 {
        errors.push(FieldError::at("batch", "Enter a valid batch"));
    }
    if !is_email(&fields.email) {
        errors.push(FieldError::at("email", "Enter a valid email"));
    }
    if !is_digits(&fields.contact, 11) {
        errors.push(FieldError::at("contact", "Enter a valid contact number"));
    }
    if !is_digits(&fields.cnic, 13) {
        errors.push(FieldError::at("cnic", "Enter a valid CNIC"));
    }

    errors
}

pub fn password(value: &str) -> Option<FieldError> {
    (value.chars().count() < MIN_PASSWORD_LEN).then(|| {
        FieldError::at("password", format!("Password must be at least {MIN_PASSWORD_LEN} characters"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid() -> StudentFields {
        StudentFields {
            name: "Zara".into(),
            cms_id: 345678,
            room_no: "7".into(),
            batch: 2021,
            dept: "NBS".into(),
            course: "BBA".into(),
            email: "zara@example.com".into(),
            father_name: "Imran".into(),
            contact: "03211234567".into(),
            address: "G-9, Islamabad".into(),
            dob: NaiveDate::from_ymd_opt(2002, 8, 14).unwrap(),
            cnic: "3740512345678".into(),
            hostel: "Fatima".into(),
        }
    }

    #[test]
    fn valid_fields_pass() {
        assert!(student_fields(&valid()).is_empty());
    }

    #[test]
    fn every_failure_is_reported() {
        let mut fields = valid();
        fields.name = "  ".into();
        fields.email = "not-an-email".into();
        fields.cnic = "12345".into();
        fields.cms_id = 0;

        let paths: Vec<String> = student_fields(&fields)
            .into_iter()
            .filter_map(|e| e.path)
            .collect();
        assert_eq!(paths, vec!["name", "cms_id", "email", "cnic"]);
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("a@b.co"));
        assert!(!is_email("a@b"));
        assert!(!is_email("@b.co"));
        assert!(!is_email("a b@c.co"));
        assert!(!is_email("a@@b.co"));
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(password("1234567").is_some());
        assert!(password("12345678").is_none());
    }
}

// ============================================================================
// VALIDATION - form checks run before anything is sent
// ============================================================================

use std::fmt;
use crate::models::{DepartmentCreate, ReportDraft, ReportSubmission, SelectedFile};

pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 500;
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

const LOCATION_REQUIRED: &str = "Please select a location on the map.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Description,
    Latitude,
    Longitude,
    Image,
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Description => "description",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Image => "file",
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }
}

/// Field-level messages, in the order they were found
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<(Field, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn clear(&mut self, field: Field) {
        self.errors.retain(|(f, _)| *f != field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Field, String)> {
        self.errors.iter()
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field.as_str(), message))
            .collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks a citizen report and returns the JSON part of the submission
pub fn validate_report(draft: &ReportDraft) -> Result<ReportSubmission, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let length = draft.description.chars().count();
    if length < DESCRIPTION_MIN {
        errors.add(Field::Description, "Description must be at least 10 characters.");
    } else if length > DESCRIPTION_MAX {
        errors.add(Field::Description, "Description must be 500 characters or less.");
    }

    check_coordinate(&mut errors, Field::Latitude, draft.latitude, 90.0);
    check_coordinate(&mut errors, Field::Longitude, draft.longitude, 180.0);

    if let Some(image) = &draft.image {
        if let Err(message) = validate_image(image) {
            errors.add(Field::Image, message);
        }
    }

    let submission = ReportSubmission {
        description: draft.description.clone(),
        latitude: draft.latitude.unwrap_or_default(),
        longitude: draft.longitude.unwrap_or_default(),
    };
    errors.into_result(submission)
}

fn check_coordinate(errors: &mut ValidationErrors, field: Field, value: Option<f64>, bound: f64) {
    match value {
        None => errors.add(field, LOCATION_REQUIRED),
        Some(v) if !v.is_finite() || v < -bound || v > bound => {
            errors.add(field, format!("{} must be between -{} and {}.", capitalize(field.as_str()), bound, bound))
        }
        Some(_) => {}
    }
}

pub fn validate_image(image: &SelectedFile) -> Result<(), &'static str> {
    if image.size > MAX_IMAGE_BYTES {
        return Err("Max file size is 5MB.");
    }
    if !ACCEPTED_IMAGE_TYPES.contains(&image.mime.as_str()) {
        return Err("Only .jpg, .png, and .webp formats are supported.");
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if !is_valid_email(email) {
        errors.add(Field::Email, "Please enter a valid email.");
    }
    if password.is_empty() {
        errors.add(Field::Password, "Password is required.");
    }
    errors.into_result(())
}

pub fn validate_signup(name: &str, email: &str, password: &str, confirm: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if name.trim().chars().count() < 2 {
        errors.add(Field::Name, "Name must be at least 2 characters.");
    }
    if !is_valid_email(email) {
        errors.add(Field::Email, "Please enter a valid email.");
    }
    if password.chars().count() < 6 {
        errors.add(Field::Password, "Password must be at least 6 characters.");
    }
    if password != confirm {
        errors.add(Field::ConfirmPassword, "Passwords do not match.");
    }
    errors.into_result(())
}

pub fn validate_department(form: &DepartmentCreate) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let length = form.name.trim().chars().count();
    if !(2..=100).contains(&length) {
        errors.add(Field::Name, "Department name must be between 2 and 100 characters.");
    }
    if !is_valid_email(&form.email) {
        errors.add(Field::Email, "Please enter a valid email.");
    }
    errors.into_result(())
}

/// `local@domain.tld` with no whitespace; deliverability is the server's problem
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(description: &str, lat: Option<f64>, lng: Option<f64>) -> ReportDraft {
        ReportDraft {
            description: description.into(),
            latitude: lat,
            longitude: lng,
            image: None,
        }
    }

    #[test]
    fn missing_location_names_both_coordinates() {
        let errors = validate_report(&draft("Streetlight out on 5th", None, None)).unwrap_err();
        assert_eq!(errors.get(Field::Latitude), Some("Please select a location on the map."));
        assert_eq!(errors.get(Field::Longitude), Some("Please select a location on the map."));
        assert!(!errors.has(Field::Description));
        assert!(errors.to_string().contains("latitude"));
    }

    #[test]
    fn description_bounds_and_coordinate_range() {
        let short = validate_report(&draft("too short", Some(1.0), Some(1.0))).unwrap_err();
        assert!(short.has(Field::Description));

        let long = validate_report(&draft(&"x".repeat(501), Some(1.0), Some(1.0))).unwrap_err();
        assert_eq!(long.get(Field::Description), Some("Description must be 500 characters or less."));

        let out_of_range = validate_report(&draft("Flooded underpass", Some(91.0), Some(-181.0))).unwrap_err();
        assert!(out_of_range.has(Field::Latitude));
        assert!(out_of_range.has(Field::Longitude));

        let ok = validate_report(&draft("Flooded underpass", Some(28.6139), Some(77.209))).unwrap();
        assert_eq!(ok.latitude, 28.6139);
    }

    #[test]
    fn image_size_and_type() {
        let mut image = SelectedFile { name: "a.gif".into(), mime: "image/gif".into(), size: 10, handle: None };
        assert_eq!(validate_image(&image), Err("Only .jpg, .png, and .webp formats are supported."));
        image.mime = "image/png".into();
        image.size = MAX_IMAGE_BYTES + 1;
        assert_eq!(validate_image(&image), Err("Max file size is 5MB."));
        image.size = MAX_IMAGE_BYTES;
        assert_eq!(validate_image(&image), Ok(()));
    }

    #[test]
    fn account_forms() {
        assert!(validate_login("admin@city.gov", "pw").is_ok());
        let errors = validate_login("admin", "").unwrap_err();
        assert!(errors.has(Field::Email) && errors.has(Field::Password));

        let errors = validate_signup("A", "a@b.co", "12345", "12346").unwrap_err();
        assert!(errors.has(Field::Name));
        assert!(errors.has(Field::Password));
        assert!(errors.has(Field::ConfirmPassword));
        assert!(!errors.has(Field::Email));
    }

    #[test]
    fn department_form() {
        let valid = DepartmentCreate { name: "Water Supply".into(), email: "water@city.gov".into() };
        assert!(validate_department(&valid).is_ok());
        let invalid = DepartmentCreate { name: "W".into(), email: "water@city".into() };
        let errors = validate_department(&invalid).unwrap_err();
        assert!(errors.has(Field::Name) && errors.has(Field::Email));
    }
}

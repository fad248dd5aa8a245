//! Tests for role parsing and registration form validation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn student_form() -> RegistrationForm {
    RegistrationForm {
        username: "amira".to_owned(),
        password: "hunter2".to_owned(),
        role: Role::Student,
        first_name: "Amira".to_owned(),
        last_name: "Haddad".to_owned(),
        year_of_study: "3".to_owned(),
        university: "Cairo University".to_owned(),
    }
}

#[rstest]
#[case("admin", Role::Admin)]
#[case(" Student ", Role::Student)]
fn roles_parse_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(raw.parse::<Role>(), Ok(expected));
}

#[rstest]
fn unknown_role_is_rejected() {
    assert!("janitor".parse::<Role>().is_err());
}

#[rstest]
fn complete_student_form_validates(student_form: RegistrationForm) {
    let registration = student_form.validate().expect("valid form");
    assert_eq!(registration.role(), Role::Student);
    assert_eq!(registration.username(), "amira");
}

#[rstest]
#[case::year(|form: &mut RegistrationForm| form.year_of_study.clear(), "year of study")]
#[case::university(|form: &mut RegistrationForm| form.university = "  ".to_owned(), "university")]
#[case::first_name(|form: &mut RegistrationForm| form.first_name.clear(), "first name")]
#[case::password(|form: &mut RegistrationForm| form.password.clear(), "password")]
fn missing_required_fields_are_reported(
    mut student_form: RegistrationForm,
    #[case] blank: fn(&mut RegistrationForm),
    #[case] field: &'static str,
) {
    blank(&mut student_form);
    assert_eq!(
        student_form.validate(),
        Err(RegistrationValidationError::MissingField { field })
    );
}

#[rstest]
fn admin_form_ignores_student_fields(mut student_form: RegistrationForm) {
    student_form.role = Role::Admin;
    student_form.year_of_study.clear();
    student_form.university.clear();

    let registration = student_form.validate().expect("admins need no study details");
    assert_eq!(registration.profile(), &RoleProfile::Admin);
}

#[rstest]
fn switching_role_resets_everything_but_credentials(mut student_form: RegistrationForm) {
    student_form.set_role(Role::Admin);

    assert_eq!(student_form.username, "amira");
    assert_eq!(student_form.password, "hunter2");
    assert_eq!(student_form.role, Role::Admin);
    assert!(student_form.first_name.is_empty());
    assert!(student_form.university.is_empty());
}

#[rstest]
fn student_registration_serialises_study_details(student_form: RegistrationForm) {
    let registration = student_form.validate().expect("valid form");
    let body = serde_json::to_value(&registration).expect("serialise");
    assert_eq!(
        body,
        json!({
            "username": "amira",
            "password": "hunter2",
            "role": "student",
            "first_name": "Amira",
            "last_name": "Haddad",
            "year_of_study": "3",
            "university": "Cairo University",
        })
    );
}

#[rstest]
fn admin_registration_omits_study_details(mut student_form: RegistrationForm) {
    student_form.set_role(Role::Admin);
    student_form.first_name = "Omar".to_owned();
    student_form.last_name = "Said".to_owned();

    let body = serde_json::to_value(student_form.validate().expect("valid")).expect("serialise");
    assert_eq!(body["role"], "admin");
    assert!(body.get("year_of_study").is_none());
    assert!(body.get("university").is_none());
}

#[rstest]
fn debug_output_never_contains_password(student_form: RegistrationForm) {
    let registration = student_form.validate().expect("valid form");
    assert!(!format!("{student_form:?}").contains("hunter2"));
    assert!(!format!("{registration:?}").contains("hunter2"));
}

use nutriauth::core::forms::*;
use nutriauth::errors::AppError;

#[test]
fn validate_checks_every_field() {
    let form = LoginForm::new("", "");
    let errs = form.validate().unwrap_err();

    assert_eq!(errs.summary(), INPUT_ERRORS);
    assert_eq!(errs.len(), 2);
    assert_eq!(errs.message_for(Field::Email), Some("Invalid email format!"));
    assert_eq!(
        errs.message_for(Field::Password),
        Some("Password must be at least 6 characters!")
    );

    assert!(LoginForm::new("a@b.com", "abcdef").validate().is_ok());
}

#[test]
fn live_errors_skip_empty_fields() {
    let mut form = SignUpForm::default();
    assert!(form.live_errors().is_empty());

    form.email = "ada@".into();
    form.password = "abcdef".into();
    let errs = form.live_errors();
    assert!(errs.contains(Field::Email));
    assert!(!errs.contains(Field::ConfirmPassword));

    // confirm is re-checked against the current password
    form.confirm_password = "abcdef".into();
    assert!(!form.live_errors().contains(Field::ConfirmPassword));
    form.password = "abcdefg".into();
    assert_eq!(
        form.live_errors().message_for(Field::ConfirmPassword),
        Some("Passwords must match!")
    );
}

#[test]
fn sign_up_requires_a_real_birth_date() {
    let form = SignUpForm {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        date_of_birth: String::new(),
        email: "ada@example.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
    };

    let errs = form.validate().unwrap_err();
    assert_eq!(errs.summary(), SIGNUP_ERRORS);
    assert_eq!(
        errs.message_for(Field::DateOfBirth),
        Some("Please select your date of birth!")
    );
    assert_eq!(errs.len(), 1);
}

#[test]
fn forgot_password_accepts_email_or_phone() {
    assert!(ForgotPasswordForm::new("ada@example.com").validate().is_ok());
    assert!(ForgotPasswordForm::new("0612345678").validate().is_ok());

    let errs = ForgotPasswordForm::new("12").validate().unwrap_err();
    assert_eq!(errs.message_for(Field::Identifier), Some("Must not be empty!"));
}

#[test]
fn reset_password_needs_matching_confirmation() {
    assert!(ResetPasswordForm::new("brandnew", "brandnew").validate().is_ok());

    let errs = ResetPasswordForm::new("brandnew", "brandne").validate().unwrap_err();
    assert_eq!(
        errs.message_for(Field::ConfirmPassword),
        Some("Must be the same password!")
    );
    assert!(!errs.contains(Field::Password));
}

#[test]
fn otp_cells_take_single_digits() {
    let mut otp = OtpForm::default();
    assert!(!otp.is_complete());

    otp.set_cell(0, "1");
    otp.set_cell(1, "x");
    assert_eq!(otp.cell(1), None);
    otp.set_cell(1, "23");
    assert_eq!(otp.cell(1), Some('3'));
    otp.set_cell(2, "4");
    otp.set_cell(3, "5");
    otp.set_cell(9, "7");
    assert!(otp.is_complete());
    assert_eq!(otp.code(), "1345");

    otp.set_cell(3, "");
    assert!(!otp.is_complete());

    otp.clear();
    assert_eq!(otp.code(), "");
    assert_eq!(OtpForm::from_digits("12a34567").code(), "1234");
}

#[test]
fn field_errors_become_the_banner_notice() {
    let errs = LoginForm::new("nope", "abcdef").validate().unwrap_err();
    let err = AppError::Validation(errs);

    assert_eq!(err.notice(), INPUT_ERRORS);
    assert!(err.to_string().contains("Email: Invalid email format!"));
}

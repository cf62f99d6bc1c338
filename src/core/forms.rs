//! Screen forms and their field-level validation.
//!
//! `validate()` gates a submit: every field is checked so each invalid one
//! can be marked at once. `live_errors()` is what a screen shows while the
//! user types: a field is only flagged once it holds something invalid.

use std::fmt;

use crate::core::otp::CODE_LEN;
use crate::core::validator::{
    do_passwords_match, is_valid_date, is_valid_email, is_valid_email_or_phone,
    is_valid_name_part, is_valid_password,
};
use crate::models::user::NewUser;

pub const INPUT_ERRORS: &str = "You have some errors in your inputs!";
pub const SIGNUP_ERRORS: &str = "Please fix all errors!";

const MSG_EMAIL: &str = "Invalid email format!";
const MSG_PASSWORD: &str = "Password must be at least 6 characters!";
const MSG_CONFIRM: &str = "Passwords must match!";
const MSG_SAME_PASSWORD: &str = "Must be the same password!";
const MSG_NAME_PART: &str = "Must be at least 2 characters!";
const MSG_BIRTH_DATE: &str = "Please select your date of birth!";
const MSG_IDENTIFIER: &str = "Must not be empty!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    DateOfBirth,
    Email,
    Identifier,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::DateOfBirth => "Date of Birth",
            Field::Email => "Email",
            Field::Identifier => "Email/Phone",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
        }
    }
}

/// Invalid fields of one form, plus the banner shown above them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    summary: &'static str,
    errors: Vec<(Field, &'static str)>,
}

impl FieldErrors {
    pub fn new(summary: &'static str) -> Self {
        Self {
            summary,
            errors: Vec::new(),
        }
    }

    fn check(&mut self, field: Field, valid: bool, msg: &'static str) {
        if !valid {
            self.errors.push((field, msg));
        }
    }

    /// Live variant: empty input is never flagged.
    fn check_live(&mut self, field: Field, value: &str, valid: bool, msg: &'static str) {
        self.check(field, value.is_empty() || valid, msg);
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn summary(&self) -> &'static str {
        self.summary
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.iter().any(|(f, _)| *f == field)
    }

    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| *msg)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().copied()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)?;
        for (field, msg) in &self.errors {
            write!(f, "\n  {}: {}", field.label(), msg)?;
        }
        Ok(())
    }
}

pub trait Form {
    fn validate(&self) -> Result<(), FieldErrors>;
    fn live_errors(&self) -> FieldErrors;
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Form for LoginForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errs = FieldErrors::new(INPUT_ERRORS);
        errs.check(Field::Email, is_valid_email(&self.email), MSG_EMAIL);
        errs.check(Field::Password, is_valid_password(&self.password), MSG_PASSWORD);
        errs.into_result()
    }

    fn live_errors(&self) -> FieldErrors {
        let mut errs = FieldErrors::new(INPUT_ERRORS);
        errs.check_live(Field::Email, &self.email, is_valid_email(&self.email), MSG_EMAIL);
        errs.check_live(
            Field::Password,
            &self.password,
            is_valid_password(&self.password),
            MSG_PASSWORD,
        );
        errs
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn to_new_user(&self) -> NewUser {
        NewUser::new(
            &self.first_name,
            &self.last_name,
            &self.date_of_birth,
            &self.email,
            &self.password,
        )
    }
}

impl Form for SignUpForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errs = FieldErrors::new(SIGNUP_ERRORS);
        errs.check(Field::FirstName, is_valid_name_part(&self.first_name), MSG_NAME_PART);
        errs.check(Field::LastName, is_valid_name_part(&self.last_name), MSG_NAME_PART);
        errs.check(
            Field::DateOfBirth,
            is_valid_date(&self.date_of_birth),
            MSG_BIRTH_DATE,
        );
        errs.check(Field::Email, is_valid_email(&self.email), MSG_EMAIL);
        errs.check(Field::Password, is_valid_password(&self.password), MSG_PASSWORD);
        errs.check(
            Field::ConfirmPassword,
            do_passwords_match(&self.password, &self.confirm_password),
            MSG_CONFIRM,
        );
        errs.into_result()
    }

    fn live_errors(&self) -> FieldErrors {
        let mut errs = FieldErrors::new(SIGNUP_ERRORS);
        errs.check_live(
            Field::FirstName,
            &self.first_name,
            is_valid_name_part(&self.first_name),
            MSG_NAME_PART,
        );
        errs.check_live(
            Field::LastName,
            &self.last_name,
            is_valid_name_part(&self.last_name),
            MSG_NAME_PART,
        );
        errs.check_live(
            Field::DateOfBirth,
            &self.date_of_birth,
            is_valid_date(&self.date_of_birth),
            MSG_BIRTH_DATE,
        );
        errs.check_live(Field::Email, &self.email, is_valid_email(&self.email), MSG_EMAIL);
        errs.check_live(
            Field::Password,
            &self.password,
            is_valid_password(&self.password),
            MSG_PASSWORD,
        );
        errs.check_live(
            Field::ConfirmPassword,
            &self.confirm_password,
            do_passwords_match(&self.password, &self.confirm_password),
            MSG_CONFIRM,
        );
        errs
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub identifier: String,
}

impl ForgotPasswordForm {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

impl Form for ForgotPasswordForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errs = FieldErrors::new(INPUT_ERRORS);
        errs.check(
            Field::Identifier,
            is_valid_email_or_phone(&self.identifier),
            MSG_IDENTIFIER,
        );
        errs.into_result()
    }

    fn live_errors(&self) -> FieldErrors {
        let mut errs = FieldErrors::new(INPUT_ERRORS);
        errs.check_live(
            Field::Identifier,
            &self.identifier,
            is_valid_email_or_phone(&self.identifier),
            MSG_IDENTIFIER,
        );
        errs
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn new(password: impl Into<String>, confirm_password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }
}

impl Form for ResetPasswordForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errs = FieldErrors::new(INPUT_ERRORS);
        errs.check(Field::Password, is_valid_password(&self.password), MSG_PASSWORD);
        errs.check(
            Field::ConfirmPassword,
            do_passwords_match(&self.password, &self.confirm_password),
            MSG_SAME_PASSWORD,
        );
        errs.into_result()
    }

    fn live_errors(&self) -> FieldErrors {
        let mut errs = FieldErrors::new(INPUT_ERRORS);
        errs.check_live(
            Field::Password,
            &self.password,
            is_valid_password(&self.password),
            MSG_PASSWORD,
        );
        errs.check_live(
            Field::ConfirmPassword,
            &self.confirm_password,
            do_passwords_match(&self.password, &self.confirm_password),
            MSG_SAME_PASSWORD,
        );
        errs
    }
}

/// The four single-digit cells of the verification screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpForm {
    cells: [Option<char>; CODE_LEN],
}

impl OtpForm {
    /// Fill cells left to right from `digits`, ignoring anything that is not
    /// an ASCII digit. Extra digits are dropped.
    pub fn from_digits(digits: &str) -> Self {
        let mut form = Self::default();
        for (i, d) in digits
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(CODE_LEN)
            .enumerate()
        {
            form.cells[i] = Some(d);
        }
        form
    }

    /// Type into one cell: the last digit of `input` wins, non-digits are ignored.
    pub fn set_cell(&mut self, index: usize, input: &str) {
        if index >= CODE_LEN {
            return;
        }
        if input.is_empty() {
            self.cells[index] = None;
        } else if let Some(d) = input.chars().rev().find(|c| c.is_ascii_digit()) {
            self.cells[index] = Some(d);
        }
    }

    pub fn cell(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    pub fn code(&self) -> String {
        self.cells.iter().flatten().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn clear(&mut self) {
        self.cells = [None; CODE_LEN];
    }
}

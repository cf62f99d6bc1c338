//! Field-format checks shared by every form.
//!
//! All functions are pure: malformed input yields `false`, nothing panics.
//! Lengths are counted in characters, not bytes.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("email pattern is valid")
});

// `[0-9]` rather than `\d`: the regex crate's `\d` also matches non-ASCII digits.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("date pattern is valid"));

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_PHONE_LEN: usize = 8;
pub const MIN_FULL_NAME_LEN: usize = 3;
pub const MIN_NAME_PART_LEN: usize = 2;

pub const MIN_BIRTH_YEAR: u32 = 1900;
pub const MAX_BIRTH_YEAR: u32 = 2024;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    char_len(phone) >= MIN_PHONE_LEN && phone.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_email_or_phone(input: &str) -> bool {
    is_valid_email(input) || is_valid_phone(input)
}

pub fn is_valid_password(password: &str) -> bool {
    char_len(password) >= MIN_PASSWORD_LEN
}

pub fn is_valid_full_name(full_name: &str) -> bool {
    char_len(full_name) >= MIN_FULL_NAME_LEN
}

/// First or last name, when the two are collected separately.
pub fn is_valid_name_part(name: &str) -> bool {
    char_len(name) >= MIN_NAME_PART_LEN
}

pub fn do_passwords_match(password: &str, confirm: &str) -> bool {
    password == confirm && !password.is_empty()
}

/// `DD/MM/YYYY` with day 1..=31, month 1..=12 and a year in range.
///
/// The day is not checked against the month: `31/02/2000` is accepted.
pub fn is_valid_date(date: &str) -> bool {
    if !DATE_RE.is_match(date) {
        return false;
    }

    let mut parts = date.split('/').map(|p| p.parse::<u32>().ok());
    let (Some(Some(day)), Some(Some(month)), Some(Some(year))) =
        (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    (1..=31).contains(&day)
        && (1..=12).contains(&month)
        && (MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&year)
}

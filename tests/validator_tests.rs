use nutriauth::core::validator::*;

#[test]
fn email_format() {
    assert!(is_valid_email("a@b.com"));
    assert!(is_valid_email("first.last+tag@sub.example.org"));

    assert!(!is_valid_email(""));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("plaintext"));
    assert!(!is_valid_email("a b@c.com"));
    assert!(!is_valid_email("a@b.com "));
}

#[test]
fn phone_needs_eight_ascii_digits() {
    assert!(is_valid_phone("12345678"));
    assert!(!is_valid_phone("1234567"));
    assert!(!is_valid_phone("1234-5678"));
    assert!(!is_valid_phone("١٢٣٤٥٦٧٨"));

    assert!(is_valid_email_or_phone("a@b.com"));
    assert!(is_valid_email_or_phone("0612345678"));
    assert!(!is_valid_email_or_phone(""));
}

#[test]
fn length_rules_count_characters() {
    assert!(is_valid_password("abcdef"));
    assert!(!is_valid_password("abcde"));
    assert!(is_valid_password("éééééé"));

    assert!(is_valid_full_name("Ada"));
    assert!(!is_valid_full_name("Al"));

    assert!(is_valid_name_part("Al"));
    assert!(is_valid_name_part("Éo"));
    assert!(!is_valid_name_part("A"));
}

#[test]
fn passwords_match_only_when_non_empty_and_equal() {
    assert!(do_passwords_match("abcdef", "abcdef"));
    assert!(!do_passwords_match("", ""));
    assert!(!do_passwords_match("abcdef", "abcdeg"));
}

#[test]
fn date_format_and_ranges() {
    assert!(is_valid_date("01/01/2000"));
    assert!(is_valid_date("31/12/1900"));
    assert!(is_valid_date("01/01/2024"));
    // day is not checked against the month
    assert!(is_valid_date("31/02/2000"));

    assert!(!is_valid_date("2000/01/01"));
    assert!(!is_valid_date("32/01/2000"));
    assert!(!is_valid_date("00/01/2000"));
    assert!(!is_valid_date("01/13/2000"));
    assert!(!is_valid_date("01/01/1899"));
    assert!(!is_valid_date("01/01/2025"));
    assert!(!is_valid_date("1/1/2000"));
    assert!(!is_valid_date(""));
}

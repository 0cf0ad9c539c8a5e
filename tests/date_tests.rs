use exif_dategeo::core::dates::{from_exif_date, is_valid_date, to_exif_date};

#[test]
fn leap_years_are_honoured() {
    assert!(is_valid_date("2024-02-29"));
    assert!(!is_valid_date("2023-02-29"));
    assert!(!is_valid_date("2024-02-30"));
}

#[test]
fn impossible_dates_are_rejected() {
    assert!(!is_valid_date("2024-13-01"));
    assert!(!is_valid_date("2024-00-10"));
    assert!(!is_valid_date("2024-04-31"));
}

#[test]
fn validator_never_panics_on_garbage() {
    assert!(!is_valid_date(""));
    assert!(!is_valid_date("abc"));
    assert!(!is_valid_date("2024/03/05"));
    assert!(!is_valid_date("2024-03-05 10:00:00"));
}

#[test]
fn exif_form_zeroes_the_time_of_day() {
    let formatted = to_exif_date("2024-03-05").expect("date should convert");
    assert_eq!(formatted, "2024:03:05 00:00:00");
}

#[test]
fn conversion_fails_on_invalid_input() {
    assert!(to_exif_date("2024-02-30").is_err());
    assert!(to_exif_date("not a date").is_err());
}

#[test]
fn exif_values_map_back_to_user_form() {
    assert_eq!(
        from_exif_date("2024:03:05 14:22:01"),
        Some(String::from("2024-03-05"))
    );
    // Only the date portion survives; the time is dropped, not preserved.
    assert_eq!(
        from_exif_date("1999:12:31 23:59:59"),
        Some(String::from("1999-12-31"))
    );
}

#[test]
fn short_or_malformed_exif_values_yield_none() {
    assert_eq!(from_exif_date("2024:03"), None);
    assert_eq!(from_exif_date(""), None);
    assert_eq!(from_exif_date("9999:99:99 00:00:00"), None);
}

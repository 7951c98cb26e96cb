/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use proptest::prelude::*;
use rust_sir_api::errors::AppError;
use rust_sir_api::lookup::{format_record, validate_dni};
use rust_sir_api::models::{Sex, SirPerson};
use serde_json::json;

// Property: DNI validation accepts exactly eight ASCII digits
proptest! {
    #[test]
    fn dni_validation_never_panics(raw in "\\PC*") {
        let _ = validate_dni(Some(raw.as_str()));
    }

    #[test]
    fn eight_ascii_digits_are_accepted(raw in "[0-9]{8}") {
        let dni = validate_dni(Some(raw.as_str())).unwrap();
        prop_assert_eq!(dni.as_str(), raw.as_str());
    }

    #[test]
    fn wrong_length_digits_are_rejected(raw in "[0-9]{1,7}|[0-9]{9,16}") {
        prop_assert_eq!(validate_dni(Some(raw.as_str())), Err(AppError::InvalidInput(raw.clone())));
    }

    #[test]
    fn any_non_digit_is_rejected(
        prefix in "[0-9]{0,7}",
        bad in "[^0-9]",
        suffix in "[0-9]{0,7}"
    ) {
        let raw = format!("{}{}{}", prefix, bad, suffix);
        prop_assert!(validate_dni(Some(raw.as_str())).is_err());
    }
}

// Property: full name is the trimmed space-join of the three name parts
proptest! {
    #[test]
    fn full_name_joins_name_parts(
        nombres in "[A-Z]{1,12}",
        ap_pat in "[A-Z]{1,12}",
        ap_mat in "[A-Z]{1,12}",
        sexo in "[0-9]"
    ) {
        let record = format_record(SirPerson {
            nombres: Some(json!(nombres)),
            ap_pat: Some(json!(ap_pat)),
            ap_mat: Some(json!(ap_mat)),
            sexo: Some(json!(sexo)),
            ..Default::default()
        });

        prop_assert_eq!(record.full_name, format!("{} {} {}", nombres, ap_pat, ap_mat));
        let expected = if sexo == "1" { Sex::Male } else { Sex::Female };
        prop_assert_eq!(record.sex, expected);
    }
}

//! DNI lookup logic shared by the HTTP handlers
//!
//! 1. Validate the raw path parameter into a `Dni`
//! 2. (the handler calls the upstream through `SirClient`)
//! 3. Normalize the upstream envelope into a `Record`, or `NotFound`

use crate::errors::AppError;
use crate::models::{Record, Sex, SirEnvelope, SirPerson};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// A national identity number that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dni(String);

impl Dni {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dni {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn dni_regex() -> &'static Regex {
    static DNI_REGEX: OnceLock<Regex> = OnceLock::new();
    // `\d` would also accept non-ASCII digits.
    DNI_REGEX.get_or_init(|| Regex::new(r"^[0-9]{8}$").expect("DNI pattern is a valid regex"))
}

/// Validate a raw DNI taken from the request path.
///
/// Absent or empty input is `MissingIdentifier`; anything other than exactly
/// eight ASCII digits is `InvalidInput`. No trimming is performed.
pub fn validate_dni(raw: Option<&str>) -> Result<Dni, AppError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(AppError::MissingIdentifier),
    };

    if !dni_regex().is_match(raw) {
        return Err(AppError::InvalidInput(raw.to_string()));
    }

    Ok(Dni(raw.to_string()))
}

/// JavaScript-style truthiness, which is how the upstream's own front-end
/// reads its flags.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text used for one part of the full name. Null and missing parts are empty.
fn name_part(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

pub fn full_name(person: &SirPerson) -> String {
    format!(
        "{} {} {}",
        name_part(person.nombres.as_ref()),
        name_part(person.ap_pat.as_ref()),
        name_part(person.ap_mat.as_ref())
    )
    .trim()
    .to_string()
}

/// Turn the upstream envelope into a `Record`.
///
/// A falsy `success` or a `data` that is missing, null or not an object is
/// `NotFound`. An absent `success` is accepted when `data` is present.
pub fn normalize(envelope: SirEnvelope) -> Result<Record, AppError> {
    if let Some(ref success) = envelope.success {
        if !is_truthy(success) {
            tracing::debug!("Upstream reported success={}", success);
            return Err(AppError::NotFound);
        }
    }

    let data = match envelope.data {
        Some(data @ Value::Object(_)) => data,
        Some(Value::Null) | None => return Err(AppError::NotFound),
        Some(other) => {
            tracing::warn!("Upstream data has unexpected shape: {}", other);
            return Err(AppError::NotFound);
        }
    };

    let person: SirPerson = serde_json::from_value(data).map_err(|e| {
        tracing::warn!("Upstream person record could not be read: {}", e);
        AppError::NotFound
    })?;

    Ok(format_record(person))
}

/// Rename upstream fields and derive `full_name` and `sex`.
pub fn format_record(person: SirPerson) -> Record {
    let full_name = full_name(&person);
    let sex = Sex::from_code(person.sexo.as_ref());

    Record {
        id: person.dni,
        first_names: person.nombres,
        paternal_surname: person.ap_pat,
        maternal_surname: person.ap_mat,
        full_name,
        sex,
        birth_date: person.fecha_nac,
        civil_status: person.est_civil,
        address: person.direccion,
        geocode: person.ubigeo_dir,
        mother_name: person.madre,
        father_name: person.padre,
        registration_date: person.fch_inscripcion,
        issue_date: person.fch_emision,
        expiry_date: person.fch_caducidad,
        tax_check_digit: person.dig_ruc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> SirEnvelope {
        SirEnvelope::from_value(value)
    }

    #[test]
    fn test_valid_dni() {
        let dni = validate_dni(Some("12345678")).unwrap();
        assert_eq!(dni.as_str(), "12345678");
        assert_eq!(dni.to_string(), "12345678");
        assert!(validate_dni(Some("00000000")).is_ok());
    }

    #[test]
    fn test_missing_dni() {
        assert_eq!(validate_dni(None), Err(AppError::MissingIdentifier));
        assert_eq!(validate_dni(Some("")), Err(AppError::MissingIdentifier));
    }

    #[test]
    fn test_invalid_dni() {
        for raw in [
            "1234567",
            "123456789",
            "1234567a",
            " 12345678",
            "12345678 ",
            "+1234567",
            "-1234567",
            "1234 678",
            "١٢٣٤٥٦٧٨",
            "１２３４５６７８",
            "12345678\n",
        ] {
            assert!(
                matches!(validate_dni(Some(raw)), Err(AppError::InvalidInput(_))),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_normalize_male_record() {
        let record = normalize(envelope(json!({
            "success": true,
            "data": {
                "dni": "12345678",
                "nombres": "JUAN",
                "ap_pat": "PEREZ",
                "ap_mat": "LOPEZ",
                "sexo": "1",
                "fecha_nac": "01/01/1990",
                "ubigeo_dir": "150101",
                "dig_ruc": "5"
            }
        })))
        .unwrap();

        assert_eq!(record.full_name, "JUAN PEREZ LOPEZ");
        assert_eq!(record.sex, Sex::Male);
        assert_eq!(record.id, Some(json!("12345678")));
        assert_eq!(record.geocode, Some(json!("150101")));
        assert_eq!(record.tax_check_digit, Some(json!("5")));
        assert_eq!(record.mother_name, None);
    }

    #[test]
    fn test_sex_codes() {
        assert_eq!(Sex::from_code(Some(&json!("1"))), Sex::Male);
        assert_eq!(Sex::from_code(Some(&json!("2"))), Sex::Female);
        assert_eq!(Sex::from_code(Some(&json!(1))), Sex::Female);
        assert_eq!(Sex::from_code(None), Sex::Female);
    }

    #[test]
    fn test_full_name_with_missing_parts() {
        let person = SirPerson {
            nombres: Some(json!("ANA")),
            ap_pat: Some(json!("QUISPE")),
            ..Default::default()
        };
        assert_eq!(full_name(&person), "ANA QUISPE");

        assert_eq!(full_name(&SirPerson::default()), "");
    }

    #[test]
    fn test_not_found_cases() {
        for body in [
            json!({ "success": false }),
            json!({ "success": false, "data": { "dni": "12345678" } }),
            json!({ "success": 0, "data": { "dni": "12345678" } }),
            json!({ "success": true }),
            json!({ "success": true, "data": null }),
            json!({ "success": true, "data": "no encontrado" }),
            json!({ "success": true, "data": [] }),
            json!({}),
        ] {
            assert_eq!(
                normalize(envelope(body.clone())),
                Err(AppError::NotFound),
                "{} should be NotFound",
                body
            );
        }
    }

    #[test]
    fn test_non_object_bodies_are_not_found() {
        for body in [
            json!(null),
            json!([]),
            json!(""),
            json!(0),
            json!(true),
            json!([true, { "nombres": "X", "sexo": "1" }]),
        ] {
            assert_eq!(SirEnvelope::from_value(body.clone()), SirEnvelope::default());
            assert_eq!(
                normalize(envelope(body.clone())),
                Err(AppError::NotFound),
                "{} should be NotFound",
                body
            );
        }
    }

    #[test]
    fn test_null_success_counts_as_absent() {
        let envelope = SirEnvelope::from_value(json!({ "success": null, "data": { "nombres": "LUIS" } }));
        assert_eq!(envelope.success, None);
        assert_eq!(normalize(envelope).unwrap().full_name, "LUIS");
    }

    #[test]
    fn test_missing_success_with_data_is_accepted() {
        let record = normalize(envelope(json!({ "data": { "nombres": "LUIS" } }))).unwrap();
        assert_eq!(record.full_name, "LUIS");
    }

    #[test]
    fn test_record_serializes_nulls_for_missing_fields() {
        let record = normalize(envelope(json!({
            "success": true,
            "data": { "dni": "12345678", "sexo": "2" }
        })))
        .unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["dni"], "12345678");
        assert_eq!(json["sexo"], "FEMENINO");
        assert_eq!(json["nombre_completo"], "");
        assert!(json["digito_ruc"].is_null());
        assert!(json["madre"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 16);
    }
}

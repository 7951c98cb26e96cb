use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ Upstream Models ============

/// Top-level body returned by the SIR AJAX endpoint.
///
/// Both fields are kept as raw JSON: the upstream has no published schema,
/// so truthiness and shape are judged by the normalizer instead of serde.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SirEnvelope {
    /// Success flag. Usually a boolean, judged by truthiness.
    pub success: Option<Value>,
    /// The person record, when found.
    pub data: Option<Value>,
}

impl SirEnvelope {
    /// Reads the envelope out of an already parsed body.
    ///
    /// Only a JSON object has fields; any other top-level value (`null`, an
    /// array, a bare string or number) yields an empty envelope, which the
    /// normalizer reports as not found. A `null` success flag counts as absent.
    pub fn from_value(body: Value) -> Self {
        match body {
            Value::Object(mut fields) => Self {
                success: fields.remove("success").filter(|v| !v.is_null()),
                data: fields.remove("data"),
            },
            _ => Self::default(),
        }
    }
}

/// Person record as sent by the upstream.
///
/// Every field is optional and copied through untouched; absent fields end up
/// as `null` in the normalized record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SirPerson {
    pub dni: Option<Value>,
    pub nombres: Option<Value>,
    pub ap_pat: Option<Value>,
    pub ap_mat: Option<Value>,
    pub sexo: Option<Value>,
    pub fecha_nac: Option<Value>,
    pub est_civil: Option<Value>,
    pub direccion: Option<Value>,
    pub ubigeo_dir: Option<Value>,
    pub madre: Option<Value>,
    pub padre: Option<Value>,
    pub fch_inscripcion: Option<Value>,
    pub fch_emision: Option<Value>,
    pub fch_caducidad: Option<Value>,
    pub dig_ruc: Option<Value>,
}

// ============ API Models ============

/// Derived sex label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sex {
    #[serde(rename = "MASCULINO")]
    Male,
    #[serde(rename = "FEMENINO")]
    Female,
}

impl Sex {
    /// `"1"` is male; any other value, including a missing one, is female.
    pub fn from_code(code: Option<&Value>) -> Self {
        match code {
            Some(Value::String(s)) if s == "1" => Sex::Male,
            _ => Sex::Female,
        }
    }
}

/// Normalized identity record returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "dni")]
    pub id: Option<Value>,
    #[serde(rename = "nombres")]
    pub first_names: Option<Value>,
    #[serde(rename = "apellido_paterno")]
    pub paternal_surname: Option<Value>,
    #[serde(rename = "apellido_materno")]
    pub maternal_surname: Option<Value>,
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
    #[serde(rename = "sexo")]
    pub sex: Sex,
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: Option<Value>,
    #[serde(rename = "estado_civil")]
    pub civil_status: Option<Value>,
    #[serde(rename = "direccion")]
    pub address: Option<Value>,
    #[serde(rename = "ubigeo")]
    pub geocode: Option<Value>,
    #[serde(rename = "madre")]
    pub mother_name: Option<Value>,
    #[serde(rename = "padre")]
    pub father_name: Option<Value>,
    #[serde(rename = "fecha_inscripcion")]
    pub registration_date: Option<Value>,
    #[serde(rename = "fecha_emision")]
    pub issue_date: Option<Value>,
    #[serde(rename = "fecha_caducidad")]
    pub expiry_date: Option<Value>,
    #[serde(rename = "digito_ruc")]
    pub tax_check_digit: Option<Value>,
}

/// Success body of `GET /api/sir/:dni`.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub estado: bool,
    pub mensaje: String,
    pub resultado: Record,
}

impl LookupResponse {
    pub fn found(resultado: Record) -> Self {
        Self {
            estado: true,
            mensaje: "Encontrado".to_string(),
            resultado,
        }
    }
}

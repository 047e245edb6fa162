//! Patient and provider profile schemas.
//!
//! Collection fields carry opaque JSON: lists are `Vec<Value>`, structured
//! fields are a bare `Value`. Absent optional fields are left out of the
//! representation rather than emitted as `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ValidationError;
use super::fields::Fields;
use super::Schema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wellness_goals: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointments: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<Value>>,
}

impl PatientProfile {
    /// Empty profile for `user_id`.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }
}

impl Schema for PatientProfile {
    const NAME: &'static str = "patient";

    fn validate(data: &Value) -> Result<Self, ValidationError> {
        let mut fields = Fields::new(Self::NAME, data)?;
        let profile = Self {
            user_id: fields.string("user_id"),
            wellness_goals: fields.optional_json("wellness_goals"),
            appointments: fields.optional_list("appointments"),
            health_data: fields.optional_json("health_data"),
            medical_history: fields.optional_list("medical_history"),
            allergies: fields.optional_list("allergies"),
            medications: fields.optional_list("medications"),
        };
        fields.finish()?;
        Ok(profile)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub user_id: String,
    pub specialty: String,
    pub license_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Vec<Value>>,
    /// Free text, e.g. `"12"` or `"10+"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinic_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_hours: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patients: Option<Vec<Value>>,
}

impl ProviderProfile {
    /// Profile with only the required fields set.
    pub fn new(
        user_id: impl Into<String>,
        specialty: impl Into<String>,
        license_number: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            specialty: specialty.into(),
            license_number: license_number.into(),
            ..Self::default()
        }
    }
}

impl Schema for ProviderProfile {
    const NAME: &'static str = "provider";

    fn validate(data: &Value) -> Result<Self, ValidationError> {
        let mut fields = Fields::new(Self::NAME, data)?;
        let profile = Self {
            user_id: fields.string("user_id"),
            specialty: fields.string("specialty"),
            license_number: fields.string("license_number"),
            qualifications: fields.optional_list("qualifications"),
            experience_years: fields.optional_string("experience_years"),
            clinic_address: fields.optional_string("clinic_address"),
            phone: fields.optional_string("phone"),
            available_hours: fields.optional_json("available_hours"),
            patients: fields.optional_list("patients"),
        };
        fields.finish()?;
        Ok(profile)
    }
}

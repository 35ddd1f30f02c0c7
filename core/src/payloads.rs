//! # Payloads
//!
//! Request bodies and response envelopes between the list manager and the
//! server. Field names are `lower_snake_case` on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::food::Food;
use crate::validate::FieldErrors;

/// Create request. Every field is required. Fields arrive untyped so that a
/// wrong-typed or missing field becomes a validation reason instead of a
/// deserialization failure; numeric strings like `"300"` are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFood {
    pub name: Option<Value>,
    pub category: Option<Value>,
    pub calories: Option<Value>,
    pub price: Option<Value>,
    pub available_date: Option<Value>,
}

/// Update request. Any subset of fields, untyped like [`NewFood`]; an
/// absent field leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_date: Option<Value>,
}

/// Successful create/update response: `{message, food}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEnvelope {
    pub message: String,
    pub food: Food,
}

/// Successful delete response: `{message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub message: String,
}

/// Not-found response: `{error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// Validation failure response: `{errors: {field: [reason, ...]}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationEnvelope {
    pub errors: FieldErrors,
}

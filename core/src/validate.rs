//! # Validation
//!
//! Field rules for create and update requests.
//!
//! Request fields arrive as untyped JSON values, so every rule has to judge
//! the type as well as the content: a wrong-typed field gets its rule's
//! reason ("must be a string", "must be an integer") rather than a
//! deserialization failure, and numeric strings are accepted for the
//! numeric fields. A field may collect several reasons; non-integer and
//! negative, for instance, are distinct rules. Stored strings are trimmed.
//!
//! Create requires all five fields. Update validates only the submitted
//! subset, but a submitted `name`/`category` must still be non-empty.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::payloads::{FoodPatch, NewFood};

/// Field name mapped to the list of reasons that field failed.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const MAX_STRING_LEN: usize = 255;

/// A create request with every rule checked and every field present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidFood {
    pub name: String,
    pub category: String,
    pub calories: i64,
    pub price: f64,
    pub available_date: NaiveDate,
}

/// An update request with every submitted field checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub calories: Option<i64>,
    pub price: Option<f64>,
    pub available_date: Option<NaiveDate>,
}

impl ValidPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.calories.is_none()
            && self.price.is_none()
            && self.available_date.is_none()
    }
}

fn push(errors: &mut FieldErrors, field: &str, reason: String) {
    errors.entry(field.to_string()).or_default().push(reason);
}

fn required(errors: &mut FieldErrors, field: &str) {
    push(errors, field, format!("The {field} field is required."));
}

/// A JSON string, non-empty once trimmed, at most [`MAX_STRING_LEN`]
/// characters. The trimmed value is what gets stored.
fn check_string(errors: &mut FieldErrors, field: &str, value: &Value) -> Option<String> {
    let Value::String(raw) = value else {
        if value.is_null() {
            required(errors, field);
        } else {
            push(errors, field, format!("The {field} field must be a string."));
        }
        return None;
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        required(errors, field);
        return None;
    }
    if trimmed.chars().count() > MAX_STRING_LEN {
        push(
            errors,
            field,
            format!("The {field} field must not be greater than {MAX_STRING_LEN} characters."),
        );
        return None;
    }
    Some(trimmed.to_string())
}

fn min_zero(errors: &mut FieldErrors, field: &str, value: i64) -> Option<i64> {
    if value < 0 {
        push(errors, field, format!("The {field} field must be at least 0."));
        return None;
    }
    Some(value)
}

/// An integer ≥ 0, given as a JSON number or a numeric string. A
/// non-integral number fails the integer rule and, when also negative, the
/// minimum rule on top.
fn check_calories(errors: &mut FieldErrors, value: &Value) -> Option<i64> {
    let integer = |errors: &mut FieldErrors| {
        push(
            errors,
            "calories",
            "The calories field must be an integer.".to_string(),
        );
    };

    match value {
        Value::Null => {
            required(errors, "calories");
            None
        }
        Value::Number(number) => match number.as_i64() {
            Some(whole) => min_zero(errors, "calories", whole),
            None => {
                integer(errors);
                if number.as_f64().is_some_and(|f| f < 0.0) {
                    push(
                        errors,
                        "calories",
                        "The calories field must be at least 0.".to_string(),
                    );
                }
                None
            }
        },
        Value::String(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                required(errors, "calories");
                return None;
            }
            match raw.parse::<i64>() {
                Ok(whole) => min_zero(errors, "calories", whole),
                Err(_) => {
                    integer(errors);
                    if raw.parse::<f64>().is_ok_and(|f| f < 0.0) {
                        push(
                            errors,
                            "calories",
                            "The calories field must be at least 0.".to_string(),
                        );
                    }
                    None
                }
            }
        }
        _ => {
            integer(errors);
            None
        }
    }
}

/// A finite number ≥ 0, given as a JSON number or a numeric string,
/// rounded to two fractional digits (the store keeps prices at cent
/// precision).
fn check_price(errors: &mut FieldErrors, value: &Value) -> Option<f64> {
    let number = |errors: &mut FieldErrors| {
        push(errors, "price", "The price field must be a number.".to_string());
    };

    let parsed = match value {
        Value::Null => {
            required(errors, "price");
            return None;
        }
        Value::Number(n) => n.as_f64(),
        Value::String(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                required(errors, "price");
                return None;
            }
            raw.parse::<f64>().ok()
        }
        _ => None,
    };

    let Some(price) = parsed.filter(|p| p.is_finite()) else {
        number(errors);
        return None;
    };

    if price < 0.0 {
        push(errors, "price", "The price field must be at least 0.".to_string());
        return None;
    }
    Some((price * 100.0).round() / 100.0)
}

/// A `YYYY-MM-DD` calendar date. Create treats an empty value as missing;
/// update only checks the date rule, so an empty submitted value fails it.
fn check_date(errors: &mut FieldErrors, value: &Value, required_when_empty: bool) -> Option<NaiveDate> {
    let invalid = |errors: &mut FieldErrors| {
        push(
            errors,
            "available_date",
            "The available_date field must be a valid date.".to_string(),
        );
    };

    match value {
        Value::String(raw) if !raw.trim().is_empty() => {
            match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    invalid(errors);
                    None
                }
            }
        }
        Value::Null | Value::String(_) if required_when_empty => {
            required(errors, "available_date");
            None
        }
        _ => {
            invalid(errors);
            None
        }
    }
}

impl NewFood {
    /// Check all five fields. A missing or empty required field yields
    /// exactly one "required" reason; a present field yields its rule's
    /// reasons.
    pub fn validate(&self) -> Result<ValidFood, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = match self.name.as_ref() {
            Some(value) => check_string(&mut errors, "name", value),
            None => {
                required(&mut errors, "name");
                None
            }
        };
        let category = match self.category.as_ref() {
            Some(value) => check_string(&mut errors, "category", value),
            None => {
                required(&mut errors, "category");
                None
            }
        };
        let calories = match self.calories.as_ref() {
            Some(value) => check_calories(&mut errors, value),
            None => {
                required(&mut errors, "calories");
                None
            }
        };
        let price = match self.price.as_ref() {
            Some(value) => check_price(&mut errors, value),
            None => {
                required(&mut errors, "price");
                None
            }
        };
        let available_date = match self.available_date.as_ref() {
            Some(value) => check_date(&mut errors, value, true),
            None => {
                required(&mut errors, "available_date");
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        // Every field passed, so every Option is Some.
        Ok(ValidFood {
            name: name.unwrap(),
            category: category.unwrap(),
            calories: calories.unwrap(),
            price: price.unwrap(),
            available_date: available_date.unwrap(),
        })
    }
}

impl FoodPatch {
    /// Check only the submitted fields. An empty patch is valid and changes
    /// nothing but the record's `updated_at`.
    pub fn validate(&self) -> Result<ValidPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut patch = ValidPatch::default();

        if let Some(value) = self.name.as_ref() {
            patch.name = check_string(&mut errors, "name", value);
        }
        if let Some(value) = self.category.as_ref() {
            patch.category = check_string(&mut errors, "category", value);
        }
        if let Some(value) = self.calories.as_ref() {
            patch.calories = check_calories(&mut errors, value);
        }
        if let Some(value) = self.price.as_ref() {
            patch.price = check_price(&mut errors, value);
        }
        if let Some(value) = self.available_date.as_ref() {
            patch.available_date = check_date(&mut errors, value, false);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn full() -> NewFood {
        NewFood {
            name: Some(json!("Tacos")),
            category: Some(json!("Mexican")),
            calories: Some(json!(300)),
            price: Some(json!(95.0)),
            available_date: Some(json!("2025-05-18")),
        }
    }

    #[test]
    fn valid_create_passes() {
        let valid = full().validate().unwrap();
        assert_eq!(valid.name, "Tacos");
        assert_eq!(valid.calories, 300);
        assert_eq!(valid.price, 95.0);
        assert_eq!(
            valid.available_date,
            NaiveDate::from_ymd_opt(2025, 5, 18).unwrap()
        );
    }

    #[test]
    fn missing_fields_each_get_one_required_reason() {
        let errors = NewFood::default().validate().unwrap_err();
        for field in ["name", "category", "calories", "price", "available_date"] {
            let reasons = &errors[field];
            assert_eq!(reasons.len(), 1, "{field}: {reasons:?}");
            assert!(reasons[0].contains("required"), "{field}: {reasons:?}");
        }
    }

    #[test]
    fn empty_name_counts_as_missing() {
        let mut food = full();
        food.name = Some(json!(""));
        let errors = food.validate().unwrap_err();
        assert!(errors["name"][0].contains("required"));
        assert!(!errors.contains_key("category"));
    }

    #[test]
    fn stored_strings_are_trimmed() {
        let mut food = full();
        food.name = Some(json!("  Tacos  "));
        food.category = Some(json!(" Mexican "));
        let valid = food.validate().unwrap();
        assert_eq!(valid.name, "Tacos");
        assert_eq!(valid.category, "Mexican");
    }

    #[test]
    fn whitespace_only_name_counts_as_missing() {
        let mut food = full();
        food.name = Some(json!("   "));
        let errors = food.validate().unwrap_err();
        assert!(errors["name"][0].contains("required"));
    }

    #[test]
    fn name_at_length_bound_passes_then_fails() {
        let mut food = full();
        food.name = Some(json!("x".repeat(MAX_STRING_LEN)));
        assert!(food.validate().is_ok());

        food.name = Some(json!("x".repeat(MAX_STRING_LEN + 1)));
        let errors = food.validate().unwrap_err();
        assert!(errors["name"][0].contains("255"));
    }

    #[test]
    fn wrong_typed_fields_get_their_rules_reasons() {
        let food = NewFood {
            name: Some(json!(123)),
            category: Some(json!(["Mexican"])),
            calories: Some(json!("lots")),
            price: Some(json!("cheap")),
            available_date: Some(json!(20250518)),
        };
        let errors = food.validate().unwrap_err();
        assert!(errors["name"][0].contains("must be a string"));
        assert!(errors["category"][0].contains("must be a string"));
        assert!(errors["calories"][0].contains("must be an integer"));
        assert!(errors["price"][0].contains("must be a number"));
        assert!(errors["available_date"][0].contains("valid date"));
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let mut food = full();
        food.calories = Some(json!("300"));
        food.price = Some(json!("95.50"));
        let valid = food.validate().unwrap();
        assert_eq!(valid.calories, 300);
        assert_eq!(valid.price, 95.5);
    }

    #[test]
    fn negative_calories_rejected() {
        let mut food = full();
        food.calories = Some(json!(-1));
        let errors = food.validate().unwrap_err();
        assert!(errors["calories"][0].contains("at least 0"));
    }

    #[test]
    fn non_integral_negative_calories_carries_both_reasons() {
        let mut food = full();
        food.calories = Some(json!(-1.5));
        let errors = food.validate().unwrap_err();
        let reasons = &errors["calories"];
        assert_eq!(reasons.len(), 2, "{reasons:?}");
        assert!(reasons[0].contains("integer"));
        assert!(reasons[1].contains("at least 0"));

        food.calories = Some(json!("-1.5"));
        let errors = food.validate().unwrap_err();
        assert_eq!(errors["calories"].len(), 2);
    }

    #[test]
    fn negative_price_rejected() {
        let mut food = full();
        food.price = Some(json!(-0.01));
        let errors = food.validate().unwrap_err();
        assert!(errors["price"][0].contains("at least 0"));
    }

    #[test]
    fn price_rounds_to_two_fractional_digits() {
        let mut food = full();
        food.price = Some(json!(12.345));
        assert_eq!(food.validate().unwrap().price, 12.35);
    }

    #[test]
    fn bad_date_rejected() {
        let mut food = full();
        food.available_date = Some(json!("2025-13-40"));
        let errors = food.validate().unwrap_err();
        assert!(errors["available_date"][0].contains("valid date"));

        food.available_date = Some(json!("next tuesday"));
        assert!(food.validate().is_err());
    }

    #[test]
    fn invalid_fields_accumulate_independently() {
        let food = NewFood {
            name: Some(json!("")),
            category: Some(json!("Mexican")),
            calories: Some(json!(-5)),
            price: Some(json!(-1.0)),
            available_date: Some(json!("nope")),
        };
        let errors = food.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(!errors.contains_key("category"));
    }

    #[test]
    fn empty_patch_is_valid() {
        let patch = FoodPatch::default().validate().unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_validates_only_submitted_fields() {
        let patch = FoodPatch {
            price: Some(json!(120.50)),
            ..FoodPatch::default()
        };
        let valid = patch.validate().unwrap();
        assert_eq!(valid.price, Some(120.50));
        assert!(valid.name.is_none());
    }

    #[test]
    fn submitted_empty_name_fails_patch() {
        let patch = FoodPatch {
            name: Some(json!("   ")),
            ..FoodPatch::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors["name"][0].contains("required"));
    }

    #[test]
    fn submitted_wrong_typed_calories_fails_patch() {
        let patch = FoodPatch {
            calories: Some(json!("lots")),
            ..FoodPatch::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors["calories"][0].contains("must be an integer"));
    }

    #[test]
    fn submitted_bad_date_fails_patch() {
        let patch = FoodPatch {
            available_date: Some(json!("05/18/2025")),
            ..FoodPatch::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors["available_date"][0].contains("valid date"));

        // Update's date rule is not "required", so empty fails it too.
        let patch = FoodPatch {
            available_date: Some(json!("")),
            ..FoodPatch::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors["available_date"][0].contains("valid date"));
    }
}

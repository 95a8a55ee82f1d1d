//! Input form: product, location and budget.
//!
//! All three fields are required. Values are trimmed only to decide whether
//! they are blank; what gets submitted is exactly what was typed.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Product,
    Location,
    Budget,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Product, FormField::Location, FormField::Budget];

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Product => "Product / Service Name",
            FormField::Location => "Location",
            FormField::Budget => "Your Monthly Budget (INR)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Product => "e.g., Luxury Leather Handbags",
            FormField::Location => "e.g., Delhi, India",
            FormField::Budget => "e.g., 20000",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::Product => "product",
            FormField::Location => "location",
            FormField::Budget => "budget",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("required fields are empty: {}", join_fields(.0))]
    MissingFields(Vec<FormField>),
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FormError {
    pub fn code(&self) -> &'static str {
        match self {
            FormError::MissingFields(_) => "missing_fields",
        }
    }
}

/// The three user inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyForm {
    pub product: String,
    pub location: String,
    /// Numeric text, not validated beyond being non-blank
    pub budget: String,
}

impl StrategyForm {
    pub fn new(
        product: impl Into<String>,
        location: impl Into<String>,
        budget: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            location: location.into(),
            budget: budget.into(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Product => &self.product,
            FormField::Location => &self.location,
            FormField::Budget => &self.budget,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Product => self.product = value,
            FormField::Location => self.location = value,
            FormField::Budget => self.budget = value,
        }
    }

    /// Fields that are empty or whitespace-only
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.value(*f).trim().is_empty())
            .collect()
    }

    /// Whether the generate control is enabled (ignoring in-flight state)
    pub fn is_submittable(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }
}

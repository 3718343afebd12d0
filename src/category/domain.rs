//! Validation for the category forms.

use std::fmt::Display;

use serde::Deserialize;

use crate::{
    Error,
    api::{CategoryPayload, TransactionType},
};

/// A non-empty category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    /// Validate a name from a form submission.
    ///
    /// # Errors
    /// Returns [Error::EmptyCategoryName] when the trimmed name is empty.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::EmptyCategoryName);
        }

        Ok(Self(name.to_owned()))
    }

    #[cfg(test)]
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check that `color` is a hex color like `#22c55e`.
fn validate_color(color: &str) -> Result<(), Error> {
    let mut chars = color.chars();

    let is_valid = color.len() == 7
        && chars.next() == Some('#')
        && chars.all(|c| c.is_ascii_hexdigit());

    if is_valid {
        Ok(())
    } else {
        Err(Error::InvalidColor(color.to_owned()))
    }
}

/// The raw data submitted by the category create/edit forms.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryFormData {
    /// The category name.
    pub name: String,
    /// The display color from the color picker.
    pub color: String,
    /// The type restriction: "", "CASH_IN" or "CASH_OUT".
    #[serde(default)]
    pub category_type: String,
}

impl CategoryFormData {
    /// The submitted type restriction, or `None` for unrestricted.
    pub fn parse_category_type(&self) -> Option<TransactionType> {
        match self.category_type.as_str() {
            "CASH_IN" => Some(TransactionType::CashIn),
            "CASH_OUT" => Some(TransactionType::CashOut),
            _ => None,
        }
    }
}

/// Validate a form submission and build the backend payload.
///
/// # Errors
/// Returns [Error::EmptyCategoryName] or [Error::InvalidColor] without
/// touching the network; these are the checks spec'd to happen before any
/// backend call.
pub fn build_category_payload(form: &CategoryFormData) -> Result<CategoryPayload, Error> {
    let name = CategoryName::new(&form.name)?;
    validate_color(&form.color)?;

    let category_type = form.parse_category_type();

    Ok(CategoryPayload {
        name: name.as_str().to_owned(),
        color: form.color.clone(),
        category_type,
    })
}

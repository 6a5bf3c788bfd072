//! Payment form state and per-field errors.

use std::fmt;

use serde::Serialize;

use super::fields::{
    format_card_number, format_cvc, format_expiry, is_valid_card_number, is_valid_cvc,
    is_valid_email, is_valid_expiry,
};

/// Country preselected on a fresh form.
pub const DEFAULT_COUNTRY: &str = "US";

/// A payment form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Receipt email address.
    Email,
    /// Card number, grouped in fours.
    CardNumber,
    /// Expiry as `MM/YY`.
    Expiry,
    /// Card security code.
    Cvc,
    /// Cardholder name.
    Name,
    /// Billing country. Not validated.
    Country,
}

impl Field {
    /// Fields checked by [`PaymentForm::validate`], in display order.
    pub const VALIDATED: [Self; 5] = [
        Self::Email,
        Self::CardNumber,
        Self::Expiry,
        Self::Cvc,
        Self::Name,
    ];

    /// Apply this field's input mask.
    #[must_use]
    pub fn format(self, raw: &str) -> String {
        match self {
            Self::CardNumber => format_card_number(raw),
            Self::Expiry => format_expiry(raw),
            Self::Cvc => format_cvc(raw),
            Self::Email | Self::Name | Self::Country => raw.to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::CardNumber => write!(f, "card_number"),
            Self::Expiry => write!(f, "expiry"),
            Self::Cvc => write!(f, "cvc"),
            Self::Name => write!(f, "name"),
            Self::Country => write!(f, "country"),
        }
    }
}

/// Values typed into the payment form, stored after masking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentForm {
    email: String,
    card_number: String,
    expiry: String,
    cvc: String,
    name: String,
    country: String,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            card_number: String::new(),
            expiry: String::new(),
            cvc: String::new(),
            name: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl PaymentForm {
    /// Store `raw` in `field` after applying the field's mask.
    pub fn set(&mut self, field: Field, raw: &str) {
        *self.slot_mut(field) = field.format(raw);
    }

    /// Current value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::CardNumber => &self.card_number,
            Field::Expiry => &self.expiry,
            Field::Cvc => &self.cvc,
            Field::Name => &self.name,
            Field::Country => &self.country,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Email => &mut self.email,
            Field::CardNumber => &mut self.card_number,
            Field::Expiry => &mut self.expiry,
            Field::Cvc => &mut self.cvc,
            Field::Name => &mut self.name,
            Field::Country => &mut self.country,
        }
    }

    /// Check every validated field.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        FieldErrors {
            email: required(&self.email, "Email is required")
                .or_else(|| (!is_valid_email(&self.email)).then_some("Invalid email address")),
            card_number: required(&self.card_number, "Card number is required").or_else(|| {
                (!is_valid_card_number(&self.card_number)).then_some("Invalid card number")
            }),
            expiry: required(&self.expiry, "Expiry date is required")
                .or_else(|| (!is_valid_expiry(&self.expiry)).then_some("Invalid expiry date")),
            cvc: required(&self.cvc, "CVC is required")
                .or_else(|| (!is_valid_cvc(&self.cvc)).then_some("Invalid CVC")),
            name: required(&self.name, "Name is required"),
        }
    }
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.is_empty().then_some(message)
}

/// One optional message per validated field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    /// Email problem.
    pub email: Option<&'static str>,
    /// Card number problem.
    pub card_number: Option<&'static str>,
    /// Expiry problem.
    pub expiry: Option<&'static str>,
    /// CVC problem.
    pub cvc: Option<&'static str>,
    /// Cardholder name problem.
    pub name: Option<&'static str>,
}

impl FieldErrors {
    /// Message for `field`, if it failed validation.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Email => self.email,
            Field::CardNumber => self.card_number,
            Field::Expiry => self.expiry,
            Field::Cvc => self.cvc,
            Field::Name => self.name,
            Field::Country => None,
        }
    }

    /// Forget the message for `field`.
    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Email => self.email = None,
            Field::CardNumber => self.card_number = None,
            Field::Expiry => self.expiry = None,
            Field::Cvc => self.cvc = None,
            Field::Name => self.name = None,
            Field::Country => {}
        }
    }

    /// Failing fields with their messages, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        Field::VALIDATED
            .into_iter()
            .filter_map(|field| self.get(field).map(|msg| (field, msg)))
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check whether every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PaymentForm {
        let mut form = PaymentForm::default();
        form.set(Field::Email, "ada@example.com");
        form.set(Field::CardNumber, "4111111111111111");
        form.set(Field::Expiry, "1228");
        form.set(Field::Cvc, "123");
        form.set(Field::Name, "Ada Lovelace");
        form
    }

    #[test]
    fn test_default_form() {
        let form = PaymentForm::default();
        assert_eq!(form.get(Field::Country), "US");
        assert_eq!(form.get(Field::Email), "");
    }

    #[test]
    fn test_set_applies_mask() {
        let form = filled();
        assert_eq!(form.get(Field::CardNumber), "4111 1111 1111 1111");
        assert_eq!(form.get(Field::Expiry), "12/28");
    }

    #[test]
    fn test_set_leaves_free_text_alone() {
        let mut form = PaymentForm::default();
        form.set(Field::Name, "  Ada 2 ");
        form.set(Field::Country, "DE");
        assert_eq!(form.get(Field::Name), "  Ada 2 ");
        assert_eq!(form.get(Field::Country), "DE");
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(filled().validate().is_empty());
    }

    #[test]
    fn test_empty_form_reports_required() {
        let errors = PaymentForm::default().validate();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.email, Some("Email is required"));
        assert_eq!(errors.card_number, Some("Card number is required"));
        assert_eq!(errors.expiry, Some("Expiry date is required"));
        assert_eq!(errors.cvc, Some("CVC is required"));
        assert_eq!(errors.name, Some("Name is required"));
    }

    #[test]
    fn test_invalid_values_report_specific_messages() {
        let mut form = PaymentForm::default();
        form.set(Field::Email, "bad-email");
        form.set(Field::CardNumber, "123");
        form.set(Field::Expiry, "13/20");
        form.set(Field::Cvc, "12");

        let errors = form.validate();
        let reported: Vec<_> = errors.iter().collect();
        assert_eq!(
            reported,
            [
                (Field::Email, "Invalid email address"),
                (Field::CardNumber, "Invalid card number"),
                (Field::Expiry, "Invalid expiry date"),
                (Field::Cvc, "Invalid CVC"),
                (Field::Name, "Name is required"),
            ]
        );
    }

    #[test]
    fn test_clear_single_field() {
        let mut errors = PaymentForm::default().validate();
        errors.clear(Field::Cvc);
        errors.clear(Field::Country);

        assert_eq!(errors.get(Field::Cvc), None);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::CardNumber.to_string(), "card_number");
        assert_eq!(Field::Cvc.to_string(), "cvc");
    }
}

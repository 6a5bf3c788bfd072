//! Mock subscription checkout.
//!
//! [`Checkout`] holds the chosen plan and the payment form, and walks a
//! submission through a small state machine:
//!
//! ```text
//! Idle --submit (valid)--> Processing --latency--> Success
//!  ^  \--submit (invalid): errors + notification, stays Idle
//!  '--------------------------- reset ------------------------'
//! ```
//!
//! No payment is taken; the processing step is a fixed, simulated delay.
//!
//! # Example
//!
//! ```
//! use jotter::checkout::{Checkout, CheckoutStatus, Field, SubmitOutcome};
//!
//! # tokio_test_block(async {
//! let mut checkout = Checkout::new().with_processing_delay(std::time::Duration::ZERO);
//! checkout.set_field(Field::Email, "ada@example.com");
//! checkout.set_field(Field::CardNumber, "4111111111111111");
//! checkout.set_field(Field::Expiry, "1228");
//! checkout.set_field(Field::Cvc, "123");
//! checkout.set_field(Field::Name, "Ada Lovelace");
//!
//! let outcome = checkout.submit().await;
//! assert!(matches!(outcome, SubmitOutcome::Succeeded(plan) if plan.name == "Pro"));
//! assert!(matches!(checkout.status(), CheckoutStatus::Success { .. }));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

mod fields;
mod form;
mod plans;

use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Error, Result};

pub use fields::{
    format_card_number, format_cvc, format_expiry, is_valid_card_number, is_valid_cvc,
    is_valid_email, is_valid_expiry,
};
pub use form::{Field, FieldErrors, PaymentForm, DEFAULT_COUNTRY};
pub use plans::{find_plan, Plan, Price, DEFAULT_PLAN_ID, PLANS};

/// Default simulated payment latency.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Where a checkout is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStatus {
    /// Editing; the form can be changed and submitted.
    Idle,
    /// A valid submission is being processed; input is locked.
    Processing,
    /// Payment went through for `plan`.
    Success {
        /// The plan that was purchased.
        plan: &'static Plan,
    },
}

/// A transient message for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Submission was rejected by validation.
    FixErrors,
    /// Payment completed.
    PaymentSucceeded,
}

impl Notification {
    /// Text to show.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::FixErrors => "Please fix the errors in the form",
            Self::PaymentSucceeded => "Payment successful!",
        }
    }

    /// Whether this reports a problem.
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, Self::FixErrors)
    }
}

/// Result of a submit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; see [`Checkout::errors`].
    Rejected,
    /// The checkout was not in a state that accepts this step.
    Ignored,
    /// The form was accepted and processing has started.
    Processing,
    /// Payment completed for the plan.
    Succeeded(&'static Plan),
}

/// Amounts shown next to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    /// The plan being bought.
    pub plan: &'static Plan,
    /// Price before tax.
    pub subtotal: Price,
    /// Tax charged.
    pub tax: Price,
    /// Amount due today.
    pub total: Price,
    /// Leading features, for the summary card.
    pub highlights: &'static [&'static str],
}

/// Number of plan features listed in the order summary.
const SUMMARY_HIGHLIGHTS: usize = 3;

/// Plan selection, payment form and submission state.
#[derive(Debug, Clone)]
pub struct Checkout {
    default_plan: &'static Plan,
    plan: &'static Plan,
    form: PaymentForm,
    errors: FieldErrors,
    status: CheckoutStatus,
    notification: Option<Notification>,
    processing_delay: Duration,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new()
    }
}

impl Checkout {
    /// A fresh checkout with [`DEFAULT_PLAN_ID`] selected.
    #[must_use]
    pub fn new() -> Self {
        let default_plan = find_plan(DEFAULT_PLAN_ID).unwrap_or(&PLANS[0]);
        Self {
            default_plan,
            plan: default_plan,
            form: PaymentForm::default(),
            errors: FieldErrors::default(),
            status: CheckoutStatus::Idle,
            notification: None,
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }

    /// A fresh checkout preselecting `plan_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPlan`] if no plan has that id.
    pub fn with_default_plan(plan_id: &str) -> Result<Self> {
        let plan = find_plan(plan_id).ok_or_else(|| Error::unknown_plan(plan_id))?;
        Ok(Self {
            default_plan: plan,
            plan,
            ..Self::new()
        })
    }

    /// Use `delay` as the simulated payment latency.
    #[must_use]
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    /// The simulated payment latency.
    #[must_use]
    pub fn processing_delay(&self) -> Duration {
        self.processing_delay
    }

    /// All plans on offer.
    #[must_use]
    pub fn plans() -> &'static [Plan] {
        &PLANS
    }

    /// The selected plan.
    #[must_use]
    pub fn selected_plan(&self) -> &'static Plan {
        self.plan
    }

    /// Choose a plan. Ignored unless the checkout is idle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPlan`] if no plan has that id.
    pub fn select_plan(&mut self, plan_id: &str) -> Result<()> {
        let plan = find_plan(plan_id).ok_or_else(|| Error::unknown_plan(plan_id))?;
        if self.status == CheckoutStatus::Idle {
            debug!(plan = plan.id, "Selected plan");
            self.plan = plan;
        }
        Ok(())
    }

    /// Type into `field`. The value is masked before it is stored, and any
    /// error shown for the field is cleared. Ignored unless idle.
    pub fn set_field(&mut self, field: Field, raw: &str) {
        if self.status != CheckoutStatus::Idle {
            return;
        }
        self.form.set(field, raw);
        self.errors.clear(field);
    }

    /// The form as currently filled in.
    #[must_use]
    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    /// Errors from the last validation, minus fields edited since.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> CheckoutStatus {
        self.status
    }

    /// Check whether input is locked for processing.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.status == CheckoutStatus::Processing
    }

    /// The last notification raised, leaving it in place.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        self.notification
    }

    /// Take the pending notification.
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    /// Re-run every field validator and record the failures.
    ///
    /// Returns `true` if the form is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = self.form.validate();
        self.errors.is_empty()
    }

    /// Validate and, if the form passes, lock it for processing.
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if self.status != CheckoutStatus::Idle {
            return SubmitOutcome::Ignored;
        }
        if !self.validate() {
            debug!(errors = self.errors.len(), "Checkout rejected");
            self.notification = Some(Notification::FixErrors);
            return SubmitOutcome::Rejected;
        }

        debug!(plan = self.plan.id, "Processing payment");
        self.status = CheckoutStatus::Processing;
        SubmitOutcome::Processing
    }

    /// Finish a submission started by [`begin_submit`](Self::begin_submit).
    pub fn complete_payment(&mut self) -> SubmitOutcome {
        if self.status != CheckoutStatus::Processing {
            return SubmitOutcome::Ignored;
        }

        info!(plan = self.plan.id, total = %self.plan.price, "Payment completed");
        self.status = CheckoutStatus::Success { plan: self.plan };
        self.notification = Some(Notification::PaymentSucceeded);
        SubmitOutcome::Succeeded(self.plan)
    }

    /// Submit the form: validate, wait out the simulated latency, succeed.
    ///
    /// There is no way to cancel once processing has started.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.submit_with(|_| {}).await
    }

    /// Like [`submit`](Self::submit), calling `on_processing` once the form
    /// has been accepted and before the latency starts.
    pub async fn submit_with<F>(&mut self, on_processing: F) -> SubmitOutcome
    where
        F: FnOnce(&Self),
    {
        match self.begin_submit() {
            SubmitOutcome::Processing => {
                on_processing(&*self);
                tokio::time::sleep(self.processing_delay).await;
                self.complete_payment()
            }
            other => other,
        }
    }

    /// Return to a blank form with the default plan.
    pub fn reset(&mut self) {
        debug!("Checkout reset");
        *self = Self {
            default_plan: self.default_plan,
            plan: self.default_plan,
            processing_delay: self.processing_delay,
            ..Self::new()
        };
    }

    /// Amounts for the selected plan.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        let features = self.plan.features;
        let tax = Price::ZERO;
        OrderSummary {
            plan: self.plan,
            subtotal: self.plan.price,
            tax,
            total: self.plan.price + tax,
            highlights: &features[..features.len().min(SUMMARY_HIGHLIGHTS)],
        }
    }

    /// Label for the submit button.
    #[must_use]
    pub fn submit_label(&self) -> String {
        if self.is_processing() {
            "Processing...".to_string()
        } else {
            format!("Pay ${}", self.plan.price)
        }
    }

    /// Confirmation text once payment has gone through.
    #[must_use]
    pub fn confirmation(&self) -> Option<String> {
        match self.status {
            CheckoutStatus::Success { plan } => Some(format!(
                "Welcome to {}! Your subscription is now active.",
                plan.name
            )),
            _ => None,
        }
    }
}

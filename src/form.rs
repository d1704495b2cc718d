use crate::emi::{self, Field, LoanInput, LoanResult, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    AwaitingInput,
    ResultDisplayed,
}

/// Everything the EMI screen shows, owned by whoever runs the event loop.
#[derive(Debug, Clone, PartialEq)]
pub struct EmiForm {
    pub principal: String,
    pub annual_rate: String,
    pub tenure: String,
    pub focus: Field,
    result: Option<(LoanInput, LoanResult)>,
    warning: Option<ValidationError>,
}

impl Default for EmiForm {
    fn default() -> Self {
        Self {
            principal: String::new(),
            annual_rate: String::new(),
            tenure: String::new(),
            focus: Field::Principal,
            result: None,
            warning: None,
        }
    }
}

impl EmiForm {
    pub fn state(&self) -> FormState {
        if self.result.is_some() {
            FormState::ResultDisplayed
        } else {
            FormState::AwaitingInput
        }
    }

    pub fn result(&self) -> Option<&(LoanInput, LoanResult)> {
        self.result.as_ref()
    }

    pub fn warning(&self) -> Option<&ValidationError> {
        self.warning.as_ref()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Principal => &self.principal,
            Field::AnnualRate => &self.annual_rate,
            Field::Tenure => &self.tenure,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Principal => &mut self.principal,
            Field::AnnualRate => &mut self.annual_rate,
            Field::Tenure => &mut self.tenure,
        }
    }

    /// Runs the calculation on the current text. A failure leaves the previous
    /// result in place and queues the error as a warning.
    pub fn calculate(&mut self) -> Result<&LoanResult, ValidationError> {
        match emi::calculate_text(&self.principal, &self.annual_rate, &self.tenure) {
            Ok((input, result)) => {
                tracing::debug!(
                    principal = input.principal(),
                    annual_rate = input.annual_rate_percent(),
                    tenure_months = input.tenure_months(),
                    emi = result.monthly_installment,
                    "EMI calculated"
                );
                self.warning = None;
                Ok(&self.result.insert((input, result)).1)
            }
            Err(err) => {
                tracing::debug!(error = %err, "calculation rejected");
                self.warning = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn reset(&mut self) {
        tracing::debug!("form reset");
        *self = Self::default();
    }

    pub fn dismiss_warning(&mut self) {
        self.warning = None;
    }

    pub fn insert_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' {
            let focus = self.focus;
            self.value_mut(focus).push(c);
        }
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        self.value_mut(focus).pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }
}

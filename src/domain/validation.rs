use super::loan::{LoanInput, MAX_TERM_YEARS, TERM_YEARS};
use super::ports::LoanView;

pub const TERM_YEARS_MESSAGE: &str = "Term (years) needs to be an integer that is less than 30.";

/// Outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    /// Offending fields in form order, each listed once.
    pub invalid_fields: Vec<String>,
    /// Set only by the term bound rule.
    pub dialog_message: Option<&'static str>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid_fields.is_empty()
    }

    fn flag(&mut self, field: &str) {
        if !self.invalid_fields.iter().any(|f| f == field) {
            self.invalid_fields.push(field.to_string());
        }
    }
}

/// Client-side preconditions checked before a plan is requested.
#[derive(Debug, Clone)]
pub struct Validator {
    term_bound: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self { term_bound: true }
    }

    /// Disables the `term_years` bound so the server's own check is the one
    /// that answers.
    pub fn without_term_bound() -> Self {
        Self { term_bound: false }
    }

    pub fn check(&self, input: &LoanInput) -> ValidationReport {
        let mut report = ValidationReport::default();

        for (name, _) in input.fields() {
            let positive = input.number(name).is_some_and(|v| v.is_positive());
            if !positive {
                report.flag(name);
            }
        }

        if self.term_bound
            && input
                .number(TERM_YEARS)
                .is_some_and(|years| years.exceeds(MAX_TERM_YEARS))
        {
            report.flag(TERM_YEARS);
            report.dialog_message = Some(TERM_YEARS_MESSAGE);
        }

        report
    }

    /// Runs a pass and reflects it on `view`: stale markings are cleared,
    /// offending fields marked, and the dialog raised for the term bound.
    pub fn validate(&self, input: &LoanInput, view: &mut dyn LoanView) -> bool {
        view.clear_invalid();
        let report = self.check(input);

        for field in &report.invalid_fields {
            view.mark_invalid(field);
        }
        if let Some(message) = report.dialog_message {
            view.set_error_text(message);
            view.show_error_dialog();
        }

        report.is_valid()
    }
}

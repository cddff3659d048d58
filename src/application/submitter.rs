use crate::domain::loan::LoanInput;
use crate::domain::plan::PaymentPlan;
use crate::domain::ports::{LoanView, PlanGatewayBox};
use crate::domain::validation::Validator;
use crate::error::{LoanError, Result};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

/// How long a submission waits for the server before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Signals emitted by the submitter for the rendering side to consume.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEvent {
    PlanLoaded(PaymentPlan),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Rejected by client-side validation; nothing was sent.
    Invalid,
    /// A plan arrived and was handed to the event channel.
    Loaded,
    /// The request failed; carries the message shown to the user.
    Failed(String),
}

/// Owns the request/response lifecycle of a form submission.
///
/// Submissions may overlap. Each successful response is pushed onto the
/// event channel as it arrives, so the last one to arrive is the one that
/// ends up rendered.
pub struct Submitter {
    gateway: PlanGatewayBox,
    validator: Validator,
    timeout: Duration,
    events: UnboundedSender<PlanEvent>,
}

impl Submitter {
    pub fn new(
        gateway: PlanGatewayBox,
        validator: Validator,
        timeout: Duration,
        events: UnboundedSender<PlanEvent>,
    ) -> Self {
        Self {
            gateway,
            validator,
            timeout,
            events,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Handles one submit event end to end.
    ///
    /// Validation problems and request failures are reported on `view`;
    /// a loaded plan is only emitted, never rendered here.
    pub async fn submit(&self, input: LoanInput, view: &mut dyn LoanView) -> SubmitOutcome {
        if !self.validator.validate(&input, view) {
            debug!(fields = input.len(), "submission stopped by validation");
            return SubmitOutcome::Invalid;
        }

        match self.send(&input).await {
            Ok(()) => SubmitOutcome::Loaded,
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "payment plan request failed");
                surface_error(view, &message);
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Requests a plan for already validated input and emits it on success.
    pub async fn send(&self, input: &LoanInput) -> Result<()> {
        let plan = tokio::time::timeout(self.timeout, self.gateway.request_plan(input))
            .await
            .map_err(|_| LoanError::Timeout)??;

        debug!(rows = plan.len(), "payment plan received");
        // A closed receiver means nobody renders any more; the plan is dropped.
        let _ = self.events.send(PlanEvent::PlanLoaded(plan));
        Ok(())
    }
}

/// Puts `message` in the error slot and raises the dialog.
pub(crate) fn surface_error(view: &mut dyn LoanView, message: &str) {
    view.set_error_text(message);
    view.show_error_dialog();
}

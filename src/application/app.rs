use super::renderer::PlanRenderer;
use super::submitter::{PlanEvent, SubmitOutcome, Submitter, surface_error};
use super::toggle::PanelToggle;
use crate::domain::loan::LoanInput;
use crate::domain::ports::{LoanView, PlanGatewayBox, PlanTable};
use crate::domain::validation::Validator;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::warn;

/// The loan form: one view, the components acting on it and the channel
/// that carries loaded plans from the submitter to the renderer.
pub struct LoanApp<V: LoanView> {
    submitter: Submitter,
    events: UnboundedReceiver<PlanEvent>,
    renderer: PlanRenderer,
    toggle: PanelToggle,
    view: V,
}

impl<V: LoanView> LoanApp<V> {
    pub fn new(gateway: PlanGatewayBox, validator: Validator, timeout: Duration, view: V) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            submitter: Submitter::new(gateway, validator, timeout, tx),
            events: rx,
            renderer: PlanRenderer::new(),
            toggle: PanelToggle::new(),
            view,
        }
    }

    /// Handles a submit event and renders the plan it produced, if any.
    pub async fn submit(&mut self, input: LoanInput) -> SubmitOutcome {
        let outcome = self.submitter.submit(input, &mut self.view).await;
        match (outcome, self.process_events()) {
            (SubmitOutcome::Loaded, Some(message)) => SubmitOutcome::Failed(message),
            (outcome, _) => outcome,
        }
    }

    /// Renders every plan waiting on the channel, in arrival order.
    ///
    /// Returns the message of the last plan that could not be rendered.
    pub fn process_events(&mut self) -> Option<String> {
        let mut failure = None;
        while let Ok(event) = self.events.try_recv() {
            match event {
                PlanEvent::PlanLoaded(plan) => {
                    if let Err(e) =
                        self.renderer
                            .on_plan_loaded(&plan, &mut self.view, &mut self.toggle)
                    {
                        let message = e.to_string();
                        warn!(error = %message, "payment plan could not be rendered");
                        surface_error(&mut self.view, &message);
                        failure = Some(message);
                    }
                }
            }
        }
        failure
    }

    pub fn click_toggle(&mut self) {
        self.toggle.click(&mut self.view);
    }

    /// Direct access for issuing requests that overlap each other.
    pub fn submitter(&self) -> &Submitter {
        &self.submitter
    }

    pub fn table(&self) -> Option<&PlanTable> {
        self.renderer.current()
    }

    pub fn toggle(&self) -> &PanelToggle {
        &self.toggle
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::submitter::DEFAULT_TIMEOUT;
    use crate::application::toggle::SHOW_INPUT_LABEL;
    use crate::domain::plan::PaymentPlan;
    use crate::error::LoanError;
    use crate::infrastructure::in_memory::{InMemoryPlanGateway, RecordingView};
    use serde_json::json;

    fn plan(value: serde_json::Value) -> PaymentPlan {
        serde_json::from_value(value).unwrap()
    }

    fn valid_loan() -> LoanInput {
        LoanInput::new()
            .with("principal", "1000")
            .with("interest_rate", "5")
            .with("term_years", "1")
    }

    #[tokio::test]
    async fn test_loaded_plan_switches_to_output() {
        let gateway = InMemoryPlanGateway::new();
        gateway
            .respond_with(Ok(plan(json!([{"month": 1, "balance": 10}]))))
            .await;
        let mut app = LoanApp::new(
            Box::new(gateway),
            Validator::new(),
            DEFAULT_TIMEOUT,
            RecordingView::new(),
        );

        let outcome = app.submit(valid_loan()).await;

        assert_eq!(outcome, SubmitOutcome::Loaded);
        let view = app.view();
        assert!(!view.input_visible);
        assert!(view.output_visible);
        assert_eq!(view.toggle_label, SHOW_INPUT_LABEL);
        assert_eq!(view.table.as_ref().unwrap().rows, vec![vec!["1", "10.00"]]);
    }

    #[tokio::test]
    async fn test_new_plan_replaces_old_table() {
        let gateway = InMemoryPlanGateway::new();
        gateway
            .respond_with(Ok(plan(json!([
                {"month": 1, "balance": 10},
                {"month": 2, "balance": 5},
                {"month": 3, "balance": 0}
            ]))))
            .await;
        gateway
            .respond_with(Ok(plan(json!([{"month": 1, "payment": 7}]))))
            .await;
        let mut app = LoanApp::new(
            Box::new(gateway),
            Validator::new(),
            DEFAULT_TIMEOUT,
            RecordingView::new(),
        );

        app.submit(valid_loan()).await;
        app.submit(valid_loan()).await;

        let view = app.view();
        assert_eq!(view.tables_destroyed, 1);
        assert_eq!(view.reinitialization_faults, 0);
        let table = view.table.as_ref().unwrap();
        assert_eq!(table.column_names(), vec!["month", "payment"]);
        assert_eq!(table.rows, vec![vec!["1", "7.00"]]);
    }

    #[tokio::test]
    async fn test_empty_plan_is_reported() {
        let gateway = InMemoryPlanGateway::new();
        gateway.respond_with(Ok(PaymentPlan::default())).await;
        let mut app = LoanApp::new(
            Box::new(gateway),
            Validator::new(),
            DEFAULT_TIMEOUT,
            RecordingView::new(),
        );

        let outcome = app.submit(valid_loan()).await;

        let message = LoanError::EmptyPlan.to_string();
        assert_eq!(outcome, SubmitOutcome::Failed(message.clone()));
        assert_eq!(app.view().error_text.as_deref(), Some(message.as_str()));
        assert!(app.view().table.is_none());
        assert!(app.view().input_visible);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_form_usable() {
        let gateway = InMemoryPlanGateway::new();
        gateway
            .respond_with(Err(LoanError::Rejected("bad".into())))
            .await;
        gateway
            .respond_with(Ok(plan(json!([{"month": 1, "balance": 1}]))))
            .await;
        let mut app = LoanApp::new(
            Box::new(gateway),
            Validator::new(),
            DEFAULT_TIMEOUT,
            RecordingView::new(),
        );

        assert_eq!(
            app.submit(valid_loan()).await,
            SubmitOutcome::Failed("bad".into())
        );
        assert_eq!(app.submit(valid_loan()).await, SubmitOutcome::Loaded);
        assert!(app.table().is_some());
    }
}

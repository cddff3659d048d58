use crate::domain::loan::LoanInput;
use crate::domain::plan::PaymentPlan;
use crate::domain::ports::{LoanView, PlanGateway, PlanTable};
use crate::error::{LoanError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

struct ScriptedResponse {
    delay: Option<Duration>,
    result: Result<PaymentPlan>,
}

#[derive(Default)]
struct GatewayState {
    responses: VecDeque<ScriptedResponse>,
    requests: Vec<LoanInput>,
}

/// A gateway answering from a queue of scripted responses.
///
/// Clones share the same queue, so a test can keep a handle to inspect
/// the requests after boxing the gateway into an application.
#[derive(Default, Clone)]
pub struct InMemoryPlanGateway {
    state: Arc<Mutex<GatewayState>>,
}

impl InMemoryPlanGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn respond_with(&self, result: Result<PaymentPlan>) {
        self.push(None, result).await;
    }

    /// Queues a response that is only delivered after `delay`.
    pub async fn respond_after(&self, delay: Duration, result: Result<PaymentPlan>) {
        self.push(Some(delay), result).await;
    }

    pub async fn requests(&self) -> Vec<LoanInput> {
        self.state.lock().await.requests.clone()
    }

    async fn push(&self, delay: Option<Duration>, result: Result<PaymentPlan>) {
        let mut state = self.state.lock().await;
        state.responses.push_back(ScriptedResponse { delay, result });
    }
}

#[async_trait]
impl PlanGateway for InMemoryPlanGateway {
    async fn request_plan(&self, input: &LoanInput) -> Result<PaymentPlan> {
        let next = {
            let mut state = self.state.lock().await;
            state.requests.push(input.clone());
            state.responses.pop_front()
        };

        let Some(response) = next else {
            return Err(LoanError::Rejected("no response scripted".to_string()));
        };
        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }
        response.result
    }
}

/// A view that records what was done to it.
///
/// `reinitialization_faults` counts tables rendered over a live table that
/// was never torn down.
#[derive(Debug, Clone)]
pub struct RecordingView {
    pub invalid_fields: Vec<String>,
    pub error_text: Option<String>,
    pub dialogs_shown: usize,
    pub table: Option<PlanTable>,
    pub tables_rendered: usize,
    pub tables_destroyed: usize,
    pub reinitialization_faults: usize,
    pub input_visible: bool,
    pub output_visible: bool,
    pub toggle_label: String,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            invalid_fields: Vec::new(),
            error_text: None,
            dialogs_shown: 0,
            table: None,
            tables_rendered: 0,
            tables_destroyed: 0,
            reinitialization_faults: 0,
            input_visible: true,
            output_visible: false,
            toggle_label: String::new(),
        }
    }
}

impl LoanView for RecordingView {
    fn clear_invalid(&mut self) {
        self.invalid_fields.clear();
    }

    fn mark_invalid(&mut self, field: &str) {
        self.invalid_fields.push(field.to_string());
    }

    fn set_error_text(&mut self, message: &str) {
        self.error_text = Some(message.to_string());
    }

    fn show_error_dialog(&mut self) {
        self.dialogs_shown += 1;
    }

    fn destroy_table(&mut self) {
        if self.table.take().is_some() {
            self.tables_destroyed += 1;
        }
    }

    fn render_table(&mut self, table: &PlanTable) {
        if self.table.is_some() {
            self.reinitialization_faults += 1;
        }
        self.table = Some(table.clone());
        self.tables_rendered += 1;
    }

    fn set_input_visible(&mut self, visible: bool) {
        self.input_visible = visible;
    }

    fn set_output_visible(&mut self, visible: bool) {
        self.output_visible = visible;
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.toggle_label = label.to_string();
    }
}

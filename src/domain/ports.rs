use super::loan::LoanInput;
use super::plan::PaymentPlan;
use crate::error::Result;
use async_trait::async_trait;

/// Transport that turns loan parameters into a payment schedule.
#[async_trait]
pub trait PlanGateway: Send + Sync {
    async fn request_plan(&self, input: &LoanInput) -> Result<PaymentPlan>;
}

pub type PlanGatewayBox = Box<dyn PlanGateway>;

/// How a rendered cell is produced from the raw row value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    AsIs,
    Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub format: CellFormat,
}

/// A schedule ready for display: columns plus formatted cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl PlanTable {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// The surface the form lives on.
///
/// Implementations own presentation only; which field is invalid, which
/// message to show and when panels switch is decided by the application.
pub trait LoanView {
    fn clear_invalid(&mut self);
    fn mark_invalid(&mut self, field: &str);
    fn set_error_text(&mut self, message: &str);
    /// Raises the blocking dialog showing the current error text.
    fn show_error_dialog(&mut self);
    fn destroy_table(&mut self);
    fn render_table(&mut self, table: &PlanTable);
    fn set_input_visible(&mut self, visible: bool);
    fn set_output_visible(&mut self, visible: bool);
    fn set_toggle_label(&mut self, label: &str);
}

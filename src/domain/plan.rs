use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordinal column of a schedule row; rendered without money formatting.
pub const MONTH_KEY: &str = "month";

/// One period of the schedule as the server sent it.
///
/// Column order is the order the keys arrived in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentPlanRow(Map<String, Value>);

impl PaymentPlanRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// A full schedule in chronological order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentPlan(Vec<PaymentPlanRow>);

impl PaymentPlan {
    pub fn new(rows: Vec<PaymentPlanRow>) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[PaymentPlanRow] {
        &self.0
    }

    pub fn first(&self) -> Option<&PaymentPlanRow> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PaymentPlanRow>> for PaymentPlan {
    fn from(rows: Vec<PaymentPlanRow>) -> Self {
        Self(rows)
    }
}

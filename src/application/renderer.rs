use super::toggle::PanelToggle;
use crate::domain::loan::parse_number;
use crate::domain::money::format_money;
use crate::domain::plan::{MONTH_KEY, PaymentPlan, PaymentPlanRow};
use crate::domain::ports::{CellFormat, Column, LoanView, PlanTable};
use crate::error::{LoanError, Result};
use serde_json::Value;
use tracing::debug;

/// Builds the display table for a plan.
///
/// The columns are the keys of the first row, in the order received; rows
/// are assumed to share that shape and missing cells render empty.
pub fn build_table(plan: &PaymentPlan) -> Result<PlanTable> {
    let first = plan.first().ok_or(LoanError::EmptyPlan)?;
    let columns: Vec<Column> = first
        .columns()
        .map(|name| Column {
            name: name.to_string(),
            format: column_format(name),
        })
        .collect();

    let rows = plan
        .rows()
        .iter()
        .map(|row| render_row(row, &columns))
        .collect();

    Ok(PlanTable { columns, rows })
}

fn column_format(name: &str) -> CellFormat {
    if name == MONTH_KEY {
        CellFormat::AsIs
    } else {
        CellFormat::Money
    }
}

fn render_row(row: &PaymentPlanRow, columns: &[Column]) -> Vec<String> {
    columns
        .iter()
        .map(|column| match row.get(&column.name) {
            Some(value) => render_cell(value, column.format),
            None => String::new(),
        })
        .collect()
}

fn render_cell(value: &Value, format: CellFormat) -> String {
    let text = match value {
        Value::Null => return String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match format {
        CellFormat::AsIs => text,
        CellFormat::Money => parse_number(&text).map(format_money).unwrap_or(text),
    }
}

/// Consumes loaded plans and keeps exactly one table on the view.
#[derive(Debug, Default)]
pub struct PlanRenderer {
    current: Option<PlanTable>,
}

impl PlanRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&PlanTable> {
        self.current.as_ref()
    }

    /// Replaces whatever table is shown with `plan`, then switches the view
    /// to the output panel with the input panel collapsed.
    ///
    /// An empty plan leaves the view untouched.
    pub fn on_plan_loaded(
        &mut self,
        plan: &PaymentPlan,
        view: &mut dyn LoanView,
        toggle: &mut PanelToggle,
    ) -> Result<()> {
        let table = build_table(plan)?;

        if self.current.take().is_some() {
            view.destroy_table();
        }
        view.render_table(&table);
        debug!(rows = table.rows.len(), columns = table.columns.len(), "plan rendered");
        self.current = Some(table);

        toggle.close(view);
        view.set_output_visible(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plan_from(value: Value) -> PaymentPlan {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_columns_follow_first_row() {
        let plan = plan_from(json!([
            {"month": 1, "principal": 100.5, "interest": 5},
            {"month": 2, "principal": 101.25, "interest": 4.9}
        ]));

        let table = build_table(&plan).unwrap();

        assert_eq!(table.column_names(), vec!["month", "principal", "interest"]);
        assert_eq!(table.columns[0].format, CellFormat::AsIs);
        assert_eq!(table.columns[1].format, CellFormat::Money);
        assert_eq!(
            table.rows,
            vec![
                vec!["1".to_string(), "100.50".to_string(), "5.00".to_string()],
                vec!["2".to_string(), "101.25".to_string(), "4.90".to_string()],
            ]
        );
    }

    #[test]
    fn test_string_amounts_are_formatted() {
        let plan = plan_from(json!([
            {"month": 1, "starting-balance": "250000.00", "total-interest": "755.21"}
        ]));

        let table = build_table(&plan).unwrap();
        assert_eq!(table.rows[0], vec!["1", "250,000.00", "755.21"]);
    }

    #[test]
    fn test_irregular_rows() {
        let plan = plan_from(json!([
            {"month": 1, "balance": 10},
            {"month": 2, "other": 3},
            {"month": 3, "balance": "n/a"},
            {"month": 4, "balance": null}
        ]));

        let table = build_table(&plan).unwrap();
        assert_eq!(table.column_names(), vec!["month", "balance"]);
        assert_eq!(table.rows[1], vec!["2", ""]);
        assert_eq!(table.rows[2], vec!["3", "n/a"]);
        assert_eq!(table.rows[3], vec!["4", ""]);
    }

    #[test]
    fn test_month_is_not_formatted() {
        let plan = plan_from(json!([{"month": 1200, "balance": 1200}]));
        let table = build_table(&plan).unwrap();
        assert_eq!(table.rows[0], vec!["1200", "1,200.00"]);
    }

    #[test]
    fn test_empty_plan() {
        assert!(matches!(
            build_table(&PaymentPlan::default()),
            Err(LoanError::EmptyPlan)
        ));
    }
}

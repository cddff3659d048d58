use super::csv::plan_writer::PlanCsvWriter;
use crate::domain::ports::{CellFormat, LoanView, PlanTable};
use crate::error::{LoanError, Result};
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
}

/// Renders a plan as an aligned text table. Amount columns are right
/// aligned, everything else left aligned.
pub fn render_text_table(table: &PlanTable) -> String {
    let mut widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| c.name.chars().count())
        .collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(
        table.columns.iter().map(|c| c.name.as_str()),
        table,
        &widths,
    ));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in &table.rows {
        out.push_str(&format_line(row.iter().map(String::as_str), table, &widths));
        out.push('\n');
    }
    out
}

fn format_line<'a>(
    cells: impl Iterator<Item = &'a str>,
    table: &PlanTable,
    widths: &[usize],
) -> String {
    let padded: Vec<String> = cells
        .zip(&table.columns)
        .zip(widths)
        .map(|((cell, column), &width)| match column.format {
            CellFormat::Money => format!("{cell:>width$}"),
            CellFormat::AsIs => format!("{cell:<width$}"),
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// A `LoanView` on a pair of streams: the table goes to `out`, field
/// markings and the error dialog go to `err`.
///
/// Write failures cannot be reported through the view calls; the first one
/// is kept and returned by [`TerminalView::finish`].
pub struct TerminalView<O: Write, E: Write> {
    out: O,
    err: E,
    format: OutputFormat,
    error_text: String,
    invalid_fields: Vec<String>,
    table_live: bool,
    failure: Option<LoanError>,
}

impl<O: Write, E: Write> TerminalView<O, E> {
    pub fn new(out: O, err: E, format: OutputFormat) -> Self {
        Self {
            out,
            err,
            format,
            error_text: String::new(),
            invalid_fields: Vec::new(),
            table_live: false,
            failure: None,
        }
    }

    pub fn invalid_fields(&self) -> &[String] {
        &self.invalid_fields
    }

    /// Flushes both streams and reports the first write failure, if any.
    pub fn finish(mut self) -> Result<()> {
        if let Some(e) = self.failure.take() {
            return Err(e);
        }
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }

    fn record(&mut self, result: Result<()>) {
        if let Err(e) = result
            && self.failure.is_none()
        {
            self.failure = Some(e);
        }
    }

    fn write_table(&mut self, table: &PlanTable) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                self.out.write_all(render_text_table(table).as_bytes())?;
                Ok(())
            }
            OutputFormat::Csv => PlanCsvWriter::new(&mut self.out).write_table(table),
        }
    }
}

impl<O: Write, E: Write> LoanView for TerminalView<O, E> {
    fn clear_invalid(&mut self) {
        self.invalid_fields.clear();
    }

    fn mark_invalid(&mut self, field: &str) {
        self.invalid_fields.push(field.to_string());
        let result = writeln!(self.err, "invalid value for `{field}`").map_err(LoanError::from);
        self.record(result);
    }

    fn set_error_text(&mut self, message: &str) {
        self.error_text = message.to_string();
    }

    fn show_error_dialog(&mut self) {
        let rule = "=".repeat(self.error_text.chars().count().clamp(5, 72));
        let result = writeln!(self.err, "{rule}\nError: {}\n{rule}", self.error_text)
            .map_err(LoanError::from);
        self.record(result);
    }

    fn destroy_table(&mut self) {
        self.table_live = false;
    }

    fn render_table(&mut self, table: &PlanTable) {
        debug!(replacing = self.table_live, "writing payment plan");
        let result = self.write_table(table);
        self.record(result);
        self.table_live = true;
    }

    fn set_input_visible(&mut self, visible: bool) {
        debug!(visible, "input panel");
    }

    fn set_output_visible(&mut self, visible: bool) {
        debug!(visible, "output panel");
    }

    fn set_toggle_label(&mut self, label: &str) {
        debug!(label, "toggle label");
    }
}

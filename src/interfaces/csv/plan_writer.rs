use crate::domain::ports::PlanTable;
use crate::error::Result;
use std::io::Write;

/// Writes a rendered plan as CSV: one header record, then one record per
/// period, cells exactly as formatted for display.
pub struct PlanCsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PlanCsvWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().from_writer(sink),
        }
    }

    pub fn write_table(&mut self, table: &PlanTable) -> Result<()> {
        self.writer.write_record(table.column_names())?;
        for row in &table.rows {
            self.writer.write_record(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

pub mod csv;
pub mod output_file;
pub mod terminal;

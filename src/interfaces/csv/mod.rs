pub mod plan_writer;

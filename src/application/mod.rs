//! Application layer orchestrating a form submission.
//!
//! `Submitter` validates and sends the form through a `PlanGateway` and emits
//! loaded plans on a `tokio` channel. `PlanRenderer` turns those plans into a
//! table on the `LoanView`. `LoanApp` owns the channel and ties the pieces to
//! a single view.

pub mod app;
pub mod renderer;
pub mod submitter;
pub mod toggle;

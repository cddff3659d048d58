//! Domain types and ports: the loan form, the schedule the server returns,
//! the client-side validation rules and the seams to the outside world.

pub mod loan;
pub mod money;
pub mod plan;
pub mod ports;
pub mod validation;

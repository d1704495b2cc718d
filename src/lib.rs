pub mod app;
pub mod cli;
pub mod config;
pub mod emi;
mod emi_proptest;
pub mod form;
pub mod format;
pub mod logging;
pub mod theme;
pub mod ui;

pub use emi::{calculate, calculate_text, Field, LoanInput, LoanResult, ValidationError};
pub use form::{EmiForm, FormState};

pub mod document;
pub mod format;

pub use document::{
    build_statement, render_statement, DealParticulars, Statement, StatementInput, StatementLine,
};
pub use format::{format_currency, format_long_date, format_percent};

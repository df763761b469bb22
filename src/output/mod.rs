//! Output formatting
//!
//! - **text**: human-readable tables on stdout
//! - **json**: machine-readable sample reports

pub mod json;
pub mod text;

pub mod diagnostics;
pub mod validation;

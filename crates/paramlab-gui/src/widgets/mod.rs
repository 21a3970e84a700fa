//! UI widgets for the paramlab GUI

pub mod model_selector;
pub mod numeric_field;
pub mod technical_log;

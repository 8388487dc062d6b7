//! UI layer: panel widgets and renderers consuming the data layer's
//! descriptors. All recomputation lives in [`crate::state`]; these functions
//! only draw.

pub mod charts;
pub mod panels;
pub mod tables;

//! Core sweep data structures: parameter spaces, run configurations, and the
//! derived output layout.

pub use dashsweep_core::*;

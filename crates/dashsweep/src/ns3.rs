//! The frontend to the external ns-3 engine: running one simulation and
//! collecting its artifacts.

pub use ns3_dash::*;

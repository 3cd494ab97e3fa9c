//! Financial projection calculators: compound growth, portfolio allocation,
//! mortgage amortization (SAC and Price) and retirement planning.

pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod core;

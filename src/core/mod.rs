//! Infrastructure: persistence, runtime state, module registry

pub mod persistence;
pub mod registry;
pub mod state;
pub mod util;

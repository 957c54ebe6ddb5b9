//! Exposing helpers.
pub mod constants;
pub mod errors;
pub mod math_procs;
pub mod utils;
#[cfg(test)]
pub(crate) mod test_accounts;

pub use errors::AmmProgramError;

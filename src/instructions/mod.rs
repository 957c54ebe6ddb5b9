//! Exposes the instructions of the AMM.
pub mod deposit;
pub mod initialize;
pub mod swap;
pub mod withdraw;

pub use deposit::apply_deposit;
pub use swap::apply_swap;
pub use withdraw::apply_withdraw;

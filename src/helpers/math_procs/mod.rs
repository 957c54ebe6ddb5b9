//! Math module for pricing the constant product curve.
pub mod numerical_ops;
pub mod curve_ops;

pub use curve_ops::{
    ConstantProductCurve, DepositQuote, SwapDirection, SwapQuote, WithdrawQuote,
};

//! Overflow-checked integer primitives for pool arithmetic.
//! Products are widened to 256 bits before any division, so two u128
//! operands can never wrap. Callers pick the rounding direction explicitly.
use ethnum::U256;

use crate::helpers::errors::AmmProgramError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

pub fn checked_add(a: u128, b: u128) -> Result<u128, AmmProgramError> {
    a.checked_add(b).ok_or(AmmProgramError::Overflow)
}

pub fn checked_sub(a: u128, b: u128) -> Result<u128, AmmProgramError> {
    a.checked_sub(b).ok_or(AmmProgramError::Underflow)
}

// Same as above for the u64 quantities stored in accounts.
pub fn checked_add_u64(a: u64, b: u64) -> Result<u64, AmmProgramError> {
    a.checked_add(b).ok_or(AmmProgramError::Overflow)
}

pub fn checked_sub_u64(a: u64, b: u64) -> Result<u64, AmmProgramError> {
    a.checked_sub(b).ok_or(AmmProgramError::Underflow)
}

/// Narrow a u128 intermediate back to the u64 stored on-chain.
pub fn to_u64(value: u128) -> Result<u64, AmmProgramError> {
    u64::try_from(value).map_err(|_| AmmProgramError::Overflow)
}

/// `a * b / denom` with a 256-bit intermediate.
pub fn mul_div(a: u128, b: u128, denom: u128, rounding: Rounding) -> Result<u128, AmmProgramError> {
    if denom == 0 {
        return Err(AmmProgramError::DivisionByZero);
    }
    let product = U256::from(a) * U256::from(b);
    let denom = U256::from(denom);
    let mut quotient = product / denom;
    if rounding == Rounding::Up && product % denom != U256::ZERO {
        quotient += U256::new(1);
    }

    let (high, low) = quotient.into_words();
    if high != 0 {
        return Err(AmmProgramError::Overflow);
    }
    Ok(low)
}

#[inline(always)]
pub fn mul_div_floor(a: u128, b: u128, denom: u128) -> Result<u128, AmmProgramError> {
    mul_div(a, b, denom, Rounding::Down)
}

#[inline(always)]
pub fn mul_div_ceil(a: u128, b: u128, denom: u128) -> Result<u128, AmmProgramError> {
    mul_div(a, b, denom, Rounding::Up)
}

// Newton-Raphson on x^2 - value. Starting from a power of two above the root
// the iterates decrease monotonically, so the first non-decreasing step
// lands on floor(sqrt(value)).
pub fn isqrt(value: u128) -> u128 {
    if value < 2 {
        return value;
    }
    let bits = 128 - value.leading_zeros();
    let mut x = 1u128 << ((bits + 1) / 2);
    loop {
        let next = (x + value / x) >> 1;
        if next >= x {
            return x;
        }
        x = next;
    }
}

/// The constant product `k = reserve_a * reserve_b`. Exact for any two u64.
#[inline(always)]
pub fn constant_product(reserve_a: u64, reserve_b: u64) -> u128 {
    u128::from(reserve_a) * u128::from(reserve_b)
}

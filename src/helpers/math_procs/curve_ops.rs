//! Constant product curve for the AMM: `reserve_a * reserve_b = k`.
//! Every division truncates in favour of the pool. Amounts paid out are
//! rounded down, amounts charged to the caller are rounded up.
use crate::helpers::constants::BPS_DENOMINATOR;
use crate::helpers::errors::AmmProgramError;
use crate::helpers::math_procs::numerical_ops::{
    checked_add, checked_sub, constant_product, isqrt, mul_div_ceil, mul_div_floor, to_u64,
};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    AtoB = 0u8,
    BtoA = 1u8,
}

impl TryFrom<u8> for SwapDirection {
    type Error = AmmProgramError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SwapDirection::AtoB),
            1 => Ok(SwapDirection::BtoA),
            _ => Err(AmmProgramError::InvalidInstructionData),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: u64,
    pub amount_in_after_fee: u64,
    pub amount_out: u64,
}

impl SwapQuote {
    /// Portion of the input kept by the pool as fee. It stays in reserves.
    pub fn fee(&self) -> u64 {
        self.amount_in - self.amount_in_after_fee
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositQuote {
    pub shares: u64,
    // Amounts actually taken from the depositor.
    pub amount_a: u64,
    pub amount_b: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawQuote {
    pub amount_a: u64,
    pub amount_b: u64,
}

// amount_in_after_fee = floor(amount_in * (10_000 - fee) / 10_000)
// amount_out = reserve_out - ceil(reserve_in * reserve_out / (reserve_in + amount_in_after_fee))
pub fn quote_swap(
    amount_in: u64, reserve_in: u64, reserve_out: u64, fee_bps: u16,
) -> Result<SwapQuote, AmmProgramError> {
    if amount_in == 0 {
        return Err(AmmProgramError::InvalidAmount);
    }
    if fee_bps >= BPS_DENOMINATOR {
        return Err(AmmProgramError::InvalidPoolState);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmProgramError::InsufficientLiquidity);
    }

    let amount_in_after_fee = mul_div_floor(
        amount_in as u128,
        (BPS_DENOMINATOR - fee_bps) as u128,
        BPS_DENOMINATOR as u128,
    )?;
    let new_reserve_in = checked_add(reserve_in as u128, amount_in_after_fee)?;
    // Rounding the retained reserve up keeps k from shrinking.
    let new_reserve_out = mul_div_ceil(reserve_in as u128, reserve_out as u128, new_reserve_in)?;
    let amount_out = checked_sub(reserve_out as u128, new_reserve_out)?;

    if amount_out == 0 || amount_out >= reserve_out as u128 {
        return Err(AmmProgramError::InsufficientLiquidity);
    }

    Ok(SwapQuote {
        amount_in,
        amount_in_after_fee: to_u64(amount_in_after_fee)?,
        amount_out: to_u64(amount_out)?,
    })
}

/// Shares minted for a deposit.
///
/// The first deposit into an empty pool mints `floor(sqrt(amount_a * amount_b))`
/// and sets the price. Later deposits mint pro-rata to `amount_a` and treat
/// `amount_b` as the most the caller is willing to pay for the ratio.
pub fn quote_deposit(
    amount_a: u64, amount_b: u64,
    reserve_a: u64, reserve_b: u64, total_shares: u64,
) -> Result<DepositQuote, AmmProgramError> {
    if amount_a == 0 || amount_b == 0 {
        return Err(AmmProgramError::InvalidAmount);
    }

    if total_shares == 0 {
        if reserve_a != 0 || reserve_b != 0 {
            return Err(AmmProgramError::InvalidPoolState);
        }
        let shares = to_u64(isqrt(constant_product(amount_a, amount_b)))?;
        return Ok(DepositQuote { shares, amount_a, amount_b });
    }
    if reserve_a == 0 || reserve_b == 0 {
        return Err(AmmProgramError::InvalidPoolState);
    }

    let shares = mul_div_floor(total_shares as u128, amount_a as u128, reserve_a as u128)?;
    let required_b = mul_div_ceil(amount_a as u128, reserve_b as u128, reserve_a as u128)?;
    if required_b > amount_b as u128 {
        return Err(AmmProgramError::SlippageExceeded);
    }
    if shares == 0 {
        return Err(AmmProgramError::InvalidAmount);
    }

    Ok(DepositQuote {
        shares: to_u64(shares)?,
        amount_a,
        amount_b: to_u64(required_b)?,
    })
}

/// Pro-rata share of both reserves for `share_amount` burned shares.
/// Whether the caller actually owns those shares is checked by the handler.
pub fn quote_withdraw(
    share_amount: u64, reserve_a: u64, reserve_b: u64, total_shares: u64,
) -> Result<WithdrawQuote, AmmProgramError> {
    if share_amount == 0 {
        return Err(AmmProgramError::InvalidAmount);
    }
    if share_amount > total_shares {
        return Err(AmmProgramError::InsufficientShares);
    }

    let amount_a = mul_div_floor(reserve_a as u128, share_amount as u128, total_shares as u128)?;
    let amount_b = mul_div_floor(reserve_b as u128, share_amount as u128, total_shares as u128)?;
    Ok(WithdrawQuote {
        amount_a: to_u64(amount_a)?,
        amount_b: to_u64(amount_b)?,
    })
}

/// A snapshot of the pool's pricing inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstantProductCurve {
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub total_shares: u64,
    pub fee_bps: u16,
}

impl ConstantProductCurve {
    pub fn k(&self) -> u128 {
        constant_product(self.reserve_a, self.reserve_b)
    }

    pub fn swap(&self, amount_in: u64, direction: SwapDirection) -> Result<SwapQuote, AmmProgramError> {
        match direction {
            SwapDirection::AtoB => quote_swap(amount_in, self.reserve_a, self.reserve_b, self.fee_bps),
            SwapDirection::BtoA => quote_swap(amount_in, self.reserve_b, self.reserve_a, self.fee_bps),
        }
    }

    pub fn deposit(&self, amount_a: u64, amount_b: u64) -> Result<DepositQuote, AmmProgramError> {
        quote_deposit(amount_a, amount_b, self.reserve_a, self.reserve_b, self.total_shares)
    }

    pub fn withdraw(&self, share_amount: u64) -> Result<WithdrawQuote, AmmProgramError> {
        quote_withdraw(share_amount, self.reserve_a, self.reserve_b, self.total_shares)
    }
}

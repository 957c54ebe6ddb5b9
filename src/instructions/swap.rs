//! Swapping the tokens. The fee is charged on the input and stays in the
//! pool's reserves, so it accrues to every liquidity provider pro-rata.
use pinocchio::{
    AccountView, ProgramResult,
    cpi::{Signer, Seed},
};
use pinocchio_log::log;

use crate::helpers::constants::POOL_SEED;
use crate::helpers::errors::AmmProgramError;
use crate::helpers::math_procs::{SwapDirection, SwapQuote};
use crate::helpers::math_procs::numerical_ops::{checked_add_u64, checked_sub_u64, constant_product};
use crate::helpers::utils::{
    check_expiration, read_i64, read_u64, AssociatedTokenAccount, ProgramAccount,
    SignerAccount, TokenProgram, TokenTransfer,
};
use crate::state::Pool;

pub struct SwapAccounts<'info> {
    pub user: &'info AccountView,
    pub pool: &'info AccountView,
    // Holds all token A deposited into the pool.
    pub vault_a: &'info AccountView,
    // Holds all token B deposited into the pool.
    pub vault_b: &'info AccountView,
    // Sends or receives token A to or from the pool.
    pub user_a_ata: &'info AccountView,
    // Sends or receives token B to or from the pool.
    pub user_b_ata: &'info AccountView,
    // SPL token program account.
    pub token_program: &'info AccountView,
}

impl<'info> TryFrom<&'info [AccountView]> for SwapAccounts<'info> {
    type Error = AmmProgramError;
    fn try_from(accounts: &'info [AccountView]) -> Result<Self, Self::Error> {
        let [
            user, pool, vault_a, vault_b, user_a_ata, user_b_ata,
            token_program, _rem_data @ ..
        ] = accounts else {
            return Err(AmmProgramError::NotEnoughAccountKeys);
        };
        // Checking the accounts.
        SignerAccount::check(user)?;
        TokenProgram::check(token_program)?;
        ProgramAccount::check(pool, Pool::LEN)?;
        let pool_state = Pool::load(pool)?;
        AssociatedTokenAccount::check(vault_a, pool.address(), pool_state.mint_a(), token_program)?;
        AssociatedTokenAccount::check(vault_b, pool.address(), pool_state.mint_b(), token_program)?;
        AssociatedTokenAccount::check(user_a_ata, user.address(), pool_state.mint_a(), token_program)?;
        AssociatedTokenAccount::check(user_b_ata, user.address(), pool_state.mint_b(), token_program)?;

        Ok(Self {
            user, pool, vault_a, vault_b, user_a_ata, user_b_ata, token_program,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapInstructionData {
    pub amount: u64,
    pub min: u64,
    pub expiration: i64,
    pub direction: SwapDirection,
}

impl SwapInstructionData {
    pub const LEN: usize = 8 * 3 + 1;
}

impl<'info> TryFrom<&'info [u8]> for SwapInstructionData {
    type Error = AmmProgramError;
    fn try_from(data: &'info [u8]) -> Result<Self, Self::Error> {
        if data.len() != Self::LEN {
            return Err(AmmProgramError::InvalidInstructionData);
        }
        Ok(Self {
            amount: read_u64(data, 0)?,
            min: read_u64(data, 8)?,
            expiration: read_i64(data, 16)?,
            direction: SwapDirection::try_from(data[24])?,
        })
    }
}

/// Moves `amount_in` into one reserve and the quoted output out of the other.
/// `total_shares` is untouched and `k` may only grow.
pub fn apply_swap(
    pool: &mut Pool, amount_in: u64, min_out: u64, direction: SwapDirection,
) -> Result<SwapQuote, AmmProgramError> {
    if !pool.is_active() {
        return Err(AmmProgramError::PoolNotInitialized);
    }
    let curve = pool.curve();
    let quote = curve.swap(amount_in, direction)?;
    if quote.amount_out < min_out {
        return Err(AmmProgramError::SlippageExceeded);
    }

    let (reserve_a, reserve_b) = match direction {
        SwapDirection::AtoB => (
            checked_add_u64(curve.reserve_a, quote.amount_in)?,
            checked_sub_u64(curve.reserve_b, quote.amount_out)?,
        ),
        SwapDirection::BtoA => (
            checked_sub_u64(curve.reserve_a, quote.amount_out)?,
            checked_add_u64(curve.reserve_b, quote.amount_in)?,
        ),
    };
    if constant_product(reserve_a, reserve_b) < curve.k() {
        return Err(AmmProgramError::InvalidPoolState);
    }

    pool.set_liquidity(reserve_a, reserve_b, curve.total_shares)?;
    Ok(quote)
}

pub struct Swap<'info> {
    pub accounts: SwapAccounts<'info>,
    pub instruction_data: SwapInstructionData,
}

impl<'info> TryFrom<(&'info [u8], &'info [AccountView])> for Swap<'info> {
    type Error = AmmProgramError;
    fn try_from((data, accounts): (&'info [u8], &'info [AccountView])) -> Result<Self, Self::Error> {
        let instruction_data = SwapInstructionData::try_from(data)?;
        let accounts = SwapAccounts::try_from(accounts)?;
        Ok(Self { accounts, instruction_data })
    }
}

impl<'info> Swap<'info> {
    pub const DISCRIMINATOR: &'info u8 = &3;

    pub fn process(&mut self) -> ProgramResult {
        check_expiration(self.instruction_data.expiration)?;

        let pool = Pool::load_mut(self.accounts.pool)?;
        let quote = apply_swap(
            pool,
            self.instruction_data.amount,
            self.instruction_data.min,
            self.instruction_data.direction,
        )?;

        let mint_a = pool.mint_a().clone();
        let mint_b = pool.mint_b().clone();
        let bump_binding = pool.bump();
        let pool_signer_seeds = [
            Seed::from(POOL_SEED),
            Seed::from(mint_a.as_ref()),
            Seed::from(mint_b.as_ref()),
            Seed::from(&bump_binding),
        ];
        let signer_seeds = [Signer::from(&pool_signer_seeds)];

        let (user_in, vault_in, vault_out, user_out) = match self.instruction_data.direction {
            SwapDirection::AtoB => (
                self.accounts.user_a_ata, self.accounts.vault_a,
                self.accounts.vault_b, self.accounts.user_b_ata,
            ),
            SwapDirection::BtoA => (
                self.accounts.user_b_ata, self.accounts.vault_b,
                self.accounts.vault_a, self.accounts.user_a_ata,
            ),
        };
        TokenTransfer::from_user(
            user_in, vault_in, self.accounts.user, quote.amount_in,
            self.accounts.token_program,
        )?;
        TokenTransfer::from_vault(
            vault_out, user_out, self.accounts.pool, quote.amount_out,
            self.accounts.token_program, &signer_seeds,
        )?;

        log!("Swapped {} in for {} out, fee {}", quote.amount_in, quote.amount_out, quote.fee());
        Ok(())
    }
}

//! Withdraw token A and token B by burning shares from the caller's position.
use pinocchio::{
    AccountView, ProgramResult,
    cpi::{Signer, Seed},
};
use pinocchio_log::log;

use crate::helpers::constants::POOL_SEED;
use crate::helpers::errors::AmmProgramError;
use crate::helpers::math_procs::WithdrawQuote;
use crate::helpers::math_procs::numerical_ops::checked_sub_u64;
use crate::helpers::utils::{
    check_expiration, read_i64, read_u64, AssociatedTokenAccount, ProgramAccount,
    SignerAccount, TokenProgram, TokenTransfer,
};
use crate::state::{Pool, Position};

pub struct WithdrawAccounts<'info> {
    // Owner of the position. Signer.
    pub user: &'info AccountView,
    pub pool: &'info AccountView,
    pub position: &'info AccountView,
    pub vault_a: &'info AccountView,
    pub vault_b: &'info AccountView,
    // Destination token accounts of the user.
    pub user_a_ata: &'info AccountView,
    pub user_b_ata: &'info AccountView,
    pub token_program: &'info AccountView,
}

impl<'info> TryFrom<&'info [AccountView]> for WithdrawAccounts<'info> {
    type Error = AmmProgramError;
    fn try_from(accounts: &'info [AccountView]) -> Result<Self, Self::Error> {
        let [
            user, pool, position, vault_a, vault_b,
            user_a_ata, user_b_ata, token_program, _rem_data @ ..
        ] = accounts else {
            return Err(AmmProgramError::NotEnoughAccountKeys);
        };
        // Checking the accounts.
        SignerAccount::check(user)?;
        TokenProgram::check(token_program)?;
        ProgramAccount::check(pool, Pool::LEN)?;
        ProgramAccount::check(position, Position::LEN)?;
        Position::load(position)?.check_owner(pool.address(), user.address())?;
        let pool_state = Pool::load(pool)?;
        AssociatedTokenAccount::check(vault_a, pool.address(), pool_state.mint_a(), token_program)?;
        AssociatedTokenAccount::check(vault_b, pool.address(), pool_state.mint_b(), token_program)?;
        AssociatedTokenAccount::check(user_a_ata, user.address(), pool_state.mint_a(), token_program)?;
        AssociatedTokenAccount::check(user_b_ata, user.address(), pool_state.mint_b(), token_program)?;

        Ok(Self {
            user, pool, position, vault_a, vault_b,
            user_a_ata, user_b_ata, token_program,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawInstructionData {
    pub shares: u64,
    pub min_a: u64,
    pub min_b: u64,
    pub expiration: i64,
}

impl WithdrawInstructionData {
    pub const LEN: usize = 8 * 4;
}

impl<'info> TryFrom<&'info [u8]> for WithdrawInstructionData {
    type Error = AmmProgramError;
    fn try_from(data: &'info [u8]) -> Result<Self, Self::Error> {
        if data.len() != Self::LEN {
            return Err(AmmProgramError::InvalidInstructionData);
        }
        Ok(Self {
            shares: read_u64(data, 0)?,
            min_a: read_u64(data, 8)?,
            min_b: read_u64(data, 16)?,
            expiration: read_i64(data, 24)?,
        })
    }
}

/// Burns `shares` from `position` and removes the pro-rata reserves.
/// Nothing is written unless every check passes.
pub fn apply_withdraw(
    pool: &mut Pool, position: &mut Position,
    shares: u64, min_a: u64, min_b: u64,
) -> Result<WithdrawQuote, AmmProgramError> {
    if !pool.is_active() {
        return Err(AmmProgramError::PoolNotInitialized);
    }
    if shares == 0 {
        return Err(AmmProgramError::InvalidAmount);
    }
    if shares > position.shares() {
        return Err(AmmProgramError::InsufficientShares);
    }
    let quote = pool.curve().withdraw(shares)?;
    if quote.amount_a < min_a || quote.amount_b < min_b {
        return Err(AmmProgramError::SlippageExceeded);
    }

    let reserve_a = checked_sub_u64(pool.reserve_a(), quote.amount_a)?;
    let reserve_b = checked_sub_u64(pool.reserve_b(), quote.amount_b)?;
    let total_shares = checked_sub_u64(pool.total_shares(), shares)?;
    let position_shares = checked_sub_u64(position.shares(), shares)?;

    pool.set_liquidity(reserve_a, reserve_b, total_shares)?;
    position.set_shares(position_shares);
    Ok(quote)
}

pub struct Withdraw<'info> {
    pub accounts: WithdrawAccounts<'info>,
    pub instruction_data: WithdrawInstructionData
}

impl<'info> TryFrom<(&'info [u8], &'info [AccountView])> for Withdraw<'info> {
    type Error = AmmProgramError;
    fn try_from((data, accounts): (&'info [u8], &'info [AccountView])) -> Result<Self, Self::Error> {
        let instruction_data = WithdrawInstructionData::try_from(data)?;
        let accounts = WithdrawAccounts::try_from(accounts)?;
        // Validated data.
        Ok(Self { accounts, instruction_data })
    }
}

impl<'info> Withdraw<'info> {
    pub const DISCRIMINATOR: &'info u8 = &2;

    pub fn process(&mut self) -> ProgramResult {
        check_expiration(self.instruction_data.expiration)?;

        let pool = Pool::load_mut(self.accounts.pool)?;
        let position = Position::load_mut(self.accounts.position)?;
        let quote = apply_withdraw(
            pool, position,
            self.instruction_data.shares,
            self.instruction_data.min_a,
            self.instruction_data.min_b,
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

        // A withdrawal of dust can round to zero on one side.
        if quote.amount_a > 0 {
            TokenTransfer::from_vault(
                self.accounts.vault_a,
                self.accounts.user_a_ata,
                self.accounts.pool,
                quote.amount_a,
                self.accounts.token_program,
                &signer_seeds,
            )?;
        }
        if quote.amount_b > 0 {
            TokenTransfer::from_vault(
                self.accounts.vault_b,
                self.accounts.user_b_ata,
                self.accounts.pool,
                quote.amount_b,
                self.accounts.token_program,
                &signer_seeds,
            )?;
        }

        log!(
            "Burned {} shares for {} A and {} B",
            self.instruction_data.shares, quote.amount_a, quote.amount_b
        );
        Ok(())
    }
}

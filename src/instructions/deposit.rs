//! Deposit token A and token B into the pool in exchange for liquidity shares.
//! The first deposit sets the price. Later deposits must match the pool
//! ratio: `amount_b` is the most the depositor will pay, the pool only takes
//! what the ratio requires. Shares are recorded in the depositor's Position
//! account, which is created on first use.
//! All the Associated Token Accounts of the user are created outside of our
//! instruction.
use pinocchio::{
    AccountView, Address, ProgramResult,
    cpi::{Signer, Seed},
};
use pinocchio_log::log;

use crate::helpers::constants::POSITION_SEED;
use crate::helpers::errors::AmmProgramError;
use crate::helpers::math_procs::DepositQuote;
use crate::helpers::math_procs::numerical_ops::checked_add_u64;
use crate::helpers::utils::{
    check_expiration, read_i64, read_u64, AssociatedTokenAccount, ProgramAccount,
    SignerAccount, SystemProgram, TokenProgram, TokenTransfer,
};
use crate::state::{Pool, Position};

pub struct DepositAccounts<'info> {
    // User depositing the tokens into the pool. Signer, pays for the position account.
    pub user: &'info AccountView,
    // The pool receiving the liquidity.(mutable)
    pub pool: &'info AccountView,
    // User's position PDA ["position", pool, user]. Created if missing.(mutable)
    pub position: &'info AccountView,
    // Pool custody for token A and token B.(mutable)
    pub vault_a: &'info AccountView,
    pub vault_b: &'info AccountView,
    // User associated token accounts the tokens are transferred from.(mutable)
    pub user_a_ata: &'info AccountView,
    pub user_b_ata: &'info AccountView,
    pub system_program: &'info AccountView,
    // SPL Token program account. Required to perform the transfers.(executable)
    pub token_program: &'info AccountView,
    pub position_bump: u8,
}

impl<'info> TryFrom<&'info [AccountView]> for DepositAccounts<'info> {
    type Error = AmmProgramError;
    fn try_from(accounts: &'info [AccountView]) -> Result<Self, Self::Error> {
        let [
            user, pool, position, vault_a, vault_b, user_a_ata, user_b_ata,
            system_program, token_program, _rem_data @ ..
        ] = accounts else {
            return Err(AmmProgramError::NotEnoughAccountKeys);
        };
        // Checking the accounts.
        SignerAccount::check(user)?;
        SystemProgram::check(system_program)?;
        TokenProgram::check(token_program)?;
        ProgramAccount::check(pool, Pool::LEN)?;
        let pool_state = Pool::load(pool)?;
        AssociatedTokenAccount::check(vault_a, pool.address(), pool_state.mint_a(), token_program)?;
        AssociatedTokenAccount::check(vault_b, pool.address(), pool_state.mint_b(), token_program)?;
        AssociatedTokenAccount::check(user_a_ata, user.address(), pool_state.mint_a(), token_program)?;
        AssociatedTokenAccount::check(user_b_ata, user.address(), pool_state.mint_b(), token_program)?;

        let (expected_position, position_bump) = Address::find_program_address(
            &[POSITION_SEED, pool.address().as_ref(), user.address().as_ref()],
            &crate::PROGRAM_ADDRESS,
        );
        if expected_position.ne(position.address()) {
            return Err(AmmProgramError::InvalidAddress);
        }

        Ok(Self {
            user, pool, position, vault_a, vault_b, user_a_ata, user_b_ata,
            system_program, token_program, position_bump,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositInstructionData {
    // Amount of token A the user deposits.
    pub amount_a: u64,
    // Most token B the user is willing to deposit.
    pub amount_b: u64,
    // Slippage bound on the minted shares.
    pub min_shares_out: u64,
    // Expiration of this order, Makes sure that the transaction has to
    // be done within a certain amount of time.
    pub expiration: i64,
}

impl DepositInstructionData {
    pub const LEN: usize = 8 * 4;
}

impl<'a> TryFrom<&'a [u8]> for DepositInstructionData {
    type Error = AmmProgramError;
    fn try_from(data: &'a [u8]) -> Result<Self, Self::Error> {
        if data.len() != Self::LEN {
            return Err(AmmProgramError::InvalidInstructionData);
        }
        Ok(Self {
            amount_a: read_u64(data, 0)?,
            amount_b: read_u64(data, 8)?,
            min_shares_out: read_u64(data, 16)?,
            expiration: read_i64(data, 24)?,
        })
    }
}

/// Applies a deposit to the pool and the depositor's position.
/// Nothing is written unless every check passes.
pub fn apply_deposit(
    pool: &mut Pool, position: &mut Position,
    amount_a: u64, amount_b: u64, min_shares_out: u64,
) -> Result<DepositQuote, AmmProgramError> {
    if !pool.is_active() {
        return Err(AmmProgramError::PoolNotInitialized);
    }
    let quote = pool.curve().deposit(amount_a, amount_b)?;
    if quote.shares < min_shares_out {
        return Err(AmmProgramError::SlippageExceeded);
    }

    let reserve_a = checked_add_u64(pool.reserve_a(), quote.amount_a)?;
    let reserve_b = checked_add_u64(pool.reserve_b(), quote.amount_b)?;
    let total_shares = checked_add_u64(pool.total_shares(), quote.shares)?;
    let position_shares = checked_add_u64(position.shares(), quote.shares)?;

    pool.set_liquidity(reserve_a, reserve_b, total_shares)?;
    position.set_shares(position_shares);
    Ok(quote)
}

pub struct Deposit<'info> {
    pub accounts: DepositAccounts<'info>,
    pub instruction_data: DepositInstructionData,
}

impl<'info> TryFrom<(&'info [u8], &'info [AccountView])> for Deposit<'info> {
    type Error = AmmProgramError;
    fn try_from((data, accounts): (&'info [u8], &'info [AccountView])) -> Result<Self, Self::Error> {
        let instruction_data = DepositInstructionData::try_from(data)?;
        let accounts = DepositAccounts::try_from(accounts)?;
        // Returning the validated struct.
        Ok(Self { accounts, instruction_data })
    }
}

impl<'info> Deposit<'info> {
    pub const DISCRIMINATOR: &'info u8 = &1;

    pub fn process(&mut self) -> ProgramResult {
        check_expiration(self.instruction_data.expiration)?;

        // First deposit of this user into this pool.
        if !self.accounts.position.owned_by(&crate::PROGRAM_ADDRESS) {
            let bump_binding = [self.accounts.position_bump];
            let position_signer_seeds = [
                Seed::from(POSITION_SEED),
                Seed::from(self.accounts.pool.address().as_ref()),
                Seed::from(self.accounts.user.address().as_ref()),
                Seed::from(&bump_binding),
            ];
            let signer_seeds = [Signer::from(&position_signer_seeds)];
            ProgramAccount::init(
                self.accounts.user,
                self.accounts.position,
                &signer_seeds,
                Position::LEN,
            )?;
            Position::load_mut(self.accounts.position)?.initialize(
                self.accounts.pool.address(),
                self.accounts.user.address(),
                bump_binding,
            )?;
            log!("Liquidity position created");
        }

        let position = Position::load_mut(self.accounts.position)?;
        position.check_owner(self.accounts.pool.address(), self.accounts.user.address())?;
        let pool = Pool::load_mut(self.accounts.pool)?;

        // State is settled before any token moves.
        let quote = apply_deposit(
            pool, position,
            self.instruction_data.amount_a,
            self.instruction_data.amount_b,
            self.instruction_data.min_shares_out,
        )?;

        TokenTransfer::from_user(
            self.accounts.user_a_ata,
            self.accounts.vault_a,
            self.accounts.user,
            quote.amount_a,
            self.accounts.token_program,
        )?;
        TokenTransfer::from_user(
            self.accounts.user_b_ata,
            self.accounts.vault_b,
            self.accounts.user,
            quote.amount_b,
            self.accounts.token_program,
        )?;

        log!("Deposited {} A and {} B, minted {} shares", quote.amount_a, quote.amount_b, quote.shares);
        Ok(())
    }
}

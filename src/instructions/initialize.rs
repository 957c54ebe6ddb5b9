//! Creates the Pool account for a mint pair, stores the fee and authority,
//! and creates the pool's custody vaults (associated token accounts owned by
//! the pool PDA). Reserves and share supply start at zero.
use pinocchio::{
    AccountView, Address, ProgramResult,
    cpi::{Signer, Seed},
};
use pinocchio_log::log;

use crate::helpers::constants::{BPS_DENOMINATOR, POOL_SEED};
use crate::helpers::errors::AmmProgramError;
use crate::helpers::utils::{
    AssociatedTokenAccount, AssociatedTokenProgram, MintInterface, ProgramAccount,
    SignerAccount, SystemProgram, TokenProgram,
};
use crate::state::Pool;

pub struct InitializeAccounts<'a> {
    // Signer with authority over the pool. Also pays for the pool and vault accounts.
    pub authority: &'a AccountView,
    // Pool PDA ["pool", mint_a, mint_b], created here. Must be mutable.
    pub pool: &'a AccountView,
    pub mint_a: &'a AccountView,
    pub mint_b: &'a AccountView,
    // Custody vaults to be created, pool's ATAs for mint_a and mint_b.
    pub vault_a: &'a AccountView,
    pub vault_b: &'a AccountView,
    pub system_program: &'a AccountView,
    pub token_program: &'a AccountView,
    pub ata_program: &'a AccountView,
    pub pool_bump: u8,
}

impl<'a> TryFrom<&'a [AccountView]> for InitializeAccounts<'a> {
    type Error = AmmProgramError;
    fn try_from(accounts: &'a [AccountView]) -> Result<Self, Self::Error> {
        let [
            authority, pool, mint_a, mint_b, vault_a, vault_b,
            system_program, token_program, ata_program, _rem_data @ ..
        ] = accounts else {
            return Err(AmmProgramError::NotEnoughAccountKeys);
        };
        SignerAccount::check(authority)?;
        MintInterface::check(mint_a)?;
        MintInterface::check(mint_b)?;
        SystemProgram::check(system_program)?;
        TokenProgram::check(token_program)?;
        AssociatedTokenProgram::check(ata_program)?;

        // One pool per pair: the pair is stored in canonical order.
        if mint_a.address().as_ref() >= mint_b.address().as_ref() {
            return Err(AmmProgramError::InvalidMintOrder);
        }

        let (expected_pool, pool_bump) = Address::find_program_address(
            &[POOL_SEED, mint_a.address().as_ref(), mint_b.address().as_ref()],
            &crate::PROGRAM_ADDRESS,
        );
        if expected_pool.ne(pool.address()) {
            return Err(AmmProgramError::InvalidAddress);
        }

        // A pool that already exists cannot be created again.
        if pool.owned_by(&crate::PROGRAM_ADDRESS) {
            if Pool::load(pool)?.is_active() {
                return Err(AmmProgramError::AlreadyInitialized);
            }
            return Err(AmmProgramError::InvalidAccountData);
        }

        Ok(Self {
            authority, pool, mint_a, mint_b, vault_a, vault_b,
            system_program, token_program, ata_program, pool_bump,
        })
    }
}

pub struct InitializeInstructionData {
    pub fee: u16, // Swap fee, expressed in basis points(1 basis point = 0.01%).
}

impl<'a> TryFrom<&'a [u8]> for InitializeInstructionData {
    type Error = AmmProgramError;
    fn try_from(data: &'a [u8]) -> Result<Self, Self::Error> {
        let fee = match data {
            [lo, hi] => u16::from_le_bytes([*lo, *hi]),
            _ => return Err(AmmProgramError::InvalidInstructionData),
        };
        if fee >= BPS_DENOMINATOR {
            return Err(AmmProgramError::InvalidAmount);
        }
        Ok(Self { fee })
    }
}

pub struct Initialize<'a> {
    pub accounts: InitializeAccounts<'a>,
    pub instruction_data: InitializeInstructionData,
}

impl<'a> TryFrom<(&'a [u8], &'a [AccountView])> for Initialize<'a> {
    type Error = AmmProgramError;
    fn try_from((data, accounts): (&'a [u8], &'a [AccountView])) -> Result<Self, Self::Error> {
        // Data first, it is cheaper to reject than the PDA derivation.
        let instruction_data = InitializeInstructionData::try_from(data)?;
        let accounts = InitializeAccounts::try_from(accounts)?;
        Ok(Self { accounts, instruction_data })
    }
}

impl<'a> Initialize<'a> {
    pub const DISCRIMINATOR: &'a u8 = &0;

    pub fn process(&mut self) -> ProgramResult {
        let bump_binding = [self.accounts.pool_bump];
        let pool_signer_seeds = [
            Seed::from(POOL_SEED),
            Seed::from(self.accounts.mint_a.address().as_ref()),
            Seed::from(self.accounts.mint_b.address().as_ref()),
            Seed::from(&bump_binding),
        ];
        let signer_seeds = [Signer::from(&pool_signer_seeds)];
        ProgramAccount::init(
            self.accounts.authority,
            self.accounts.pool,
            &signer_seeds,
            Pool::LEN,
        )?;

        let pool = Pool::load_mut(self.accounts.pool)?;
        pool.initialize(
            self.instruction_data.fee,
            self.accounts.authority.address(),
            self.accounts.mint_a.address(),
            self.accounts.mint_b.address(),
            bump_binding,
        )?;

        // Creating the custody vaults, owned by the pool.
        AssociatedTokenAccount::init(
            self.accounts.vault_a,
            self.accounts.mint_a,
            self.accounts.authority,
            self.accounts.pool,
            self.accounts.system_program,
            self.accounts.token_program,
        )?;
        AssociatedTokenAccount::init(
            self.accounts.vault_b,
            self.accounts.mint_b,
            self.accounts.authority,
            self.accounts.pool,
            self.accounts.system_program,
            self.accounts.token_program,
        )?;

        log!("Pool initialized with fee {} bps", self.instruction_data.fee);
        Ok(())
    }
}

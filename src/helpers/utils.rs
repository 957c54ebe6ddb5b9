//! Accounts creation and verification utilities.
//! Supports both token-2022 and legacy token program.
use pinocchio::{
    AccountView, Address, ProgramResult,
    cpi::Signer, sysvars::{clock::Clock, rent::Rent, Sysvar},
};
use pinocchio_associated_token_account::instructions::CreateIdempotent;
use pinocchio_system::instructions::{Allocate, Assign, CreateAccount, Transfer as SystemTransfer};
use pinocchio_token_2022::instructions::Transfer;
use pinocchio_token_2022::ID as TOKEN_2022_PROGRAM_ID;

use crate::helpers::errors::AmmProgramError;

const TOKEN_2022_ACCOUNT_DISCRIMINATOR_OFFSET: usize = 165;
pub const TOKEN_2022_MINT_DISCRIMINATOR: u8 = 0x01;
pub const TOKEN_2022_TOKEN_ACCOUNT_DISCRIMINATOR: u8 = 0x02;

// Signer accounts checks.
pub struct SignerAccount;
impl SignerAccount {
    /// Confirm if account is signer or not.
    pub fn check(account: &AccountView) -> Result<(), AmmProgramError> {
        if !account.is_signer() {
            return Err(AmmProgramError::InvalidSignature);
        }
        Ok(())
    }
}

// The token program passed in must be one of the two we can CPI into.
pub struct TokenProgram;
impl TokenProgram {
    pub fn check(account: &AccountView) -> Result<(), AmmProgramError> {
        let address = account.address();
        if address.ne(&pinocchio_token::ID) && address.ne(&TOKEN_2022_PROGRAM_ID) {
            return Err(AmmProgramError::InvalidAddress);
        }
        Ok(())
    }
}

// Programs the instructions CPI into, other than the token program.
pub struct SystemProgram;
impl SystemProgram {
    pub fn check(account: &AccountView) -> Result<(), AmmProgramError> {
        if account.address().ne(&pinocchio_system::ID) {
            return Err(AmmProgramError::InvalidAddress);
        }
        Ok(())
    }
}

pub struct AssociatedTokenProgram;
impl AssociatedTokenProgram {
    pub fn check(account: &AccountView) -> Result<(), AmmProgramError> {
        if account.address().ne(&pinocchio_associated_token_account::ID) {
            return Err(AmmProgramError::InvalidAddress);
        }
        Ok(())
    }
}

// Performing checks with interfaces to support both the legacy token programs
// and token-2022 standards.
pub struct MintInterface;
impl MintInterface {
    pub fn check(account: &AccountView) -> Result<(), AmmProgramError> {
        if !account.owned_by(&TOKEN_2022_PROGRAM_ID) {
            if !account.owned_by(&pinocchio_token::ID) {
                return Err(AmmProgramError::InvalidOwner);
            }
            if account.data_len().ne(&pinocchio_token::state::Mint::LEN) {
                return Err(AmmProgramError::InvalidAccountData);
            }
        } else {
            let data = account.try_borrow()?;
            if data.len().ne(&pinocchio_token::state::Mint::LEN) {
                if data.len().le(&TOKEN_2022_ACCOUNT_DISCRIMINATOR_OFFSET) {
                    return Err(AmmProgramError::InvalidAccountData);
                }
                if data[TOKEN_2022_ACCOUNT_DISCRIMINATOR_OFFSET].ne(&TOKEN_2022_MINT_DISCRIMINATOR) {
                    return Err(AmmProgramError::InvalidAccountData);
                }
            }
        }
        Ok(())
    }
}

pub struct TokenInterface;
impl TokenInterface {
    pub fn check(account: &AccountView) -> Result<(), AmmProgramError> {
        if !account.owned_by(&TOKEN_2022_PROGRAM_ID) {
            if !account.owned_by(&pinocchio_token::ID) {
                return Err(AmmProgramError::InvalidOwner);
            }
            if account.data_len().ne(&pinocchio_token::state::TokenAccount::LEN) {
                return Err(AmmProgramError::InvalidAccountData);
            }
        } else {
            let data = account.try_borrow()?;
            if data.len().ne(&pinocchio_token::state::TokenAccount::LEN) {
                if data.len().le(&TOKEN_2022_ACCOUNT_DISCRIMINATOR_OFFSET) {
                    return Err(AmmProgramError::InvalidAccountData);
                }
                if data[TOKEN_2022_ACCOUNT_DISCRIMINATOR_OFFSET]
                    .ne(&TOKEN_2022_TOKEN_ACCOUNT_DISCRIMINATOR) {
                        return Err(AmmProgramError::InvalidAccountData);
                }
            }
        }
        Ok(())
    }
}

// Moving tokens between user accounts and the pool's custody vaults.
// No checks here, they are done by the interfaces when accounts are parsed.
// The CPI goes to whichever token program owns the accounts, legacy or 2022.
pub struct TokenTransfer;
impl TokenTransfer {
    /// User signs for tokens leaving their own account.
    pub fn from_user(
        from: &AccountView, to: &AccountView,
        authority: &AccountView, amount: u64,
        token_program: &AccountView,
    ) -> ProgramResult {
        Transfer {
            from, to, authority, amount,
            token_program: token_program.address(),
        }.invoke()
    }

    /// The pool PDA signs for tokens leaving a vault.
    pub fn from_vault(
        from: &AccountView, to: &AccountView,
        pool: &AccountView, amount: u64,
        token_program: &AccountView,
        pool_signer: &[Signer],
    ) -> ProgramResult {
        Transfer {
            from, to, authority: pool, amount,
            token_program: token_program.address(),
        }.invoke_signed(pool_signer)
    }
}

pub struct AssociatedTokenAccount;
impl AssociatedTokenAccount {
    pub fn check(
        account: &AccountView,
        wallet: &Address,
        mint: &Address,
        token_program: &AccountView
    ) -> Result<(), AmmProgramError> {
        // Validate token account structure and owner
        TokenInterface::check(account)?;
        // Validating the PDA address.
        if Address::find_program_address(
            &[wallet.as_ref(), token_program.address().as_ref(), mint.as_ref()],
            &pinocchio_associated_token_account::ID,
        ).0.ne(account.address()) {
            return Err(AmmProgramError::InvalidAddress);
        }
        Ok(())
    }

    pub fn init(
        account: &AccountView,
        mint: &AccountView,
        payer: &AccountView,
        wallet: &AccountView,
        system_program: &AccountView,
        token_program: &AccountView,
    ) -> ProgramResult {
        CreateIdempotent {
            funding_account: payer,
            account,
            wallet,
            mint,
            system_program,
            token_program,
        }.invoke()
    }
}

pub struct ProgramAccount;
impl ProgramAccount {
    pub fn check(account: &AccountView, len: usize) -> Result<(), AmmProgramError> {
        // Check if this account is owned by this program
        if !account.owned_by(&crate::PROGRAM_ADDRESS) {
            return Err(AmmProgramError::InvalidOwner);
        }
        if account.data_len().ne(&len) {
            return Err(AmmProgramError::InvalidAccountData);
        }
        Ok(())
    }

    /// Creates a program-owned PDA. A PDA that already holds lamports
    /// (anyone can send them) cannot go through `CreateAccount`, so it is
    /// topped up to rent exemption, allocated and assigned instead.
    pub fn init(
        payer: &AccountView, account: &AccountView,
        signer: &[Signer], space: usize
    ) -> ProgramResult {
        // Get required lamports for rent.
        let rent = Rent::get()?;
        let lamports = rent.try_minimum_balance(space)?;
        let current = account.lamports();
        if current == 0 {
            return CreateAccount {
                from: payer,
                to: account,
                lamports,
                space: space as u64,
                owner: &crate::PROGRAM_ADDRESS,
            }.invoke_signed(signer);
        }

        if current < lamports {
            SystemTransfer {
                from: payer,
                to: account,
                lamports: lamports - current,
            }.invoke()?;
        }
        Allocate { account, space: space as u64 }.invoke_signed(signer)?;
        Assign { account, owner: &crate::PROGRAM_ADDRESS }.invoke_signed(signer)?;
        Ok(())
    }
}

/// Rejects instructions submitted after their `expiration` unix timestamp.
pub fn check_expiration(expiration: i64) -> Result<(), AmmProgramError> {
    let clock = Clock::get()?;
    if clock.unix_timestamp > expiration {
        return Err(AmmProgramError::Expired);
    }
    Ok(())
}

// Instruction data readers. Length is checked by the caller, but a short
// slice is still reported rather than panicking.
#[inline(always)]
pub fn read_u64(data: &[u8], offset: usize) -> Result<u64, AmmProgramError> {
    data.get(offset..offset + 8)
        .and_then(|bytes| bytes.try_into().ok())
        .map(u64::from_le_bytes)
        .ok_or(AmmProgramError::InvalidInstructionData)
}

#[inline(always)]
pub fn read_i64(data: &[u8], offset: usize) -> Result<i64, AmmProgramError> {
    read_u64(data, offset).map(|value| value as i64)
}

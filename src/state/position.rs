//! A provider's liquidity position in one pool.
//! The sum of `shares` over all positions of a pool equals its `total_shares`.
use pinocchio::{AccountView, Address};

use crate::helpers::errors::AmmProgramError;

#[repr(C)]
pub struct Position {
    pool: Address,
    owner: Address,
    shares: [u8; 8],
    bump: [u8; 1], // PDA bump for ["position", pool, owner].
    initialized: u8,
}

impl Position {
    pub const LEN: usize = core::mem::size_of::<Position>();

    #[inline(always)]
    pub fn load(account_info: &AccountView) -> Result<&Self, AmmProgramError> {
        Self::check_account(account_info)?;
        let data = account_info.try_borrow()?;
        Ok(unsafe { &*(data.as_ptr() as *const Position) })
    }

    #[inline(always)]
    pub fn load_mut(account_info: &AccountView) -> Result<&mut Self, AmmProgramError> {
        Self::check_account(account_info)?;
        let mut data = account_info.try_borrow_mut()?;
        Ok(unsafe { &mut *(data.as_mut_ptr() as *mut Position) })
    }

    #[inline(always)]
    fn check_account(account_info: &AccountView) -> Result<(), AmmProgramError> {
        if account_info.data_len() != Self::LEN {
            return Err(AmmProgramError::InvalidAccountData);
        }
        if !account_info.owned_by(&crate::PROGRAM_ADDRESS) {
            return Err(AmmProgramError::InvalidOwner);
        }
        Ok(())
    }

    #[inline(always)]
    pub unsafe fn from_bytes_unchecked(bytes: &[u8]) -> &Self {
        &*(bytes.as_ptr() as *const Position)
    }

    #[inline(always)]
    pub unsafe fn from_bytes_unchecked_mut(bytes: &mut [u8]) -> &mut Self {
        &mut *(bytes.as_mut_ptr() as *mut Position)
    }

    #[inline(always)]
    pub fn pool(&self) -> &Address { &self.pool }
    #[inline(always)]
    pub fn owner(&self) -> &Address { &self.owner }
    #[inline(always)]
    pub fn shares(&self) -> u64 { u64::from_le_bytes(self.shares) }
    #[inline(always)]
    pub fn bump(&self) -> [u8; 1] { self.bump }
    #[inline(always)]
    pub fn is_initialized(&self) -> bool { self.initialized == 1 }

    pub fn initialize(&mut self, pool: &Address, owner: &Address, bump: [u8; 1]) -> Result<(), AmmProgramError> {
        if self.is_initialized() {
            return Err(AmmProgramError::AlreadyInitialized);
        }
        self.pool = pool.clone();
        self.owner = owner.clone();
        self.shares = 0u64.to_le_bytes();
        self.bump = bump;
        self.initialized = 1;
        Ok(())
    }

    /// Only the pool's instruction handlers call this, right after the pool
    /// record accepted the matching change to `total_shares`.
    #[inline(always)]
    pub(crate) fn set_shares(&mut self, shares: u64) {
        self.shares = shares.to_le_bytes();
    }

    /// The position must belong to `owner` and to `pool`.
    pub fn check_owner(&self, pool: &Address, owner: &Address) -> Result<(), AmmProgramError> {
        if !self.is_initialized() || self.pool.ne(pool) || self.owner.ne(owner) {
            return Err(AmmProgramError::Unauthorized);
        }
        Ok(())
    }
}

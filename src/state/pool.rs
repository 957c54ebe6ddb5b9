//! The Pool account: one per mint pair. Stores reserves, the outstanding
//! liquidity share supply and the immutable fee configuration.
use pinocchio::{AccountView, Address};

use crate::helpers::constants::BPS_DENOMINATOR;
use crate::helpers::errors::AmmProgramError;
use crate::helpers::math_procs::ConstantProductCurve;

#[repr(C)]
pub struct Pool {
    state: u8, // PoolStatus, Uninitialized until the Initialize instruction runs.
    bump: [u8; 1], // PDA bump for ["pool", mint_a, mint_b].
    fee: [u8; 2], // Swap fee in basis points, fixed at initialization.
    authority: Address, // Administrative reference. Not owned by the pool.
    mint_a: Address,
    mint_b: Address,
    reserve_a: [u8; 8],
    reserve_b: [u8; 8],
    total_shares: [u8; 8],
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolStatus {
    Uninitialized = 0u8,
    Active = 1u8,
}

impl From<PoolStatus> for u8 {
    fn from(state: PoolStatus) -> Self {
        state as u8
    }
}

impl Pool {
    pub const LEN: usize = core::mem::size_of::<Pool>();

    // ====================== READING DATA ===========================
    #[inline(always)]
    pub fn load(account_info: &AccountView) -> Result<&Self, AmmProgramError> {
        Self::check_account(account_info)?;
        // Borrow is scoped and enforced
        let data = account_info.try_borrow()?;
        Ok(unsafe { &*(data.as_ptr() as *const Pool) })
    }

    // Return Pool from given bytes.
    #[inline(always)]
    pub unsafe fn from_bytes_unchecked(bytes: &[u8]) -> &Self {
        &*(bytes.as_ptr() as *const Pool)
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

    // Getter methods for safe field access.
    #[inline(always)]
    pub fn is_active(&self) -> bool { self.state == PoolStatus::Active as u8 }
    #[inline(always)]
    pub fn bump(&self) -> [u8; 1] { self.bump }
    #[inline(always)]
    pub fn fee(&self) -> u16 { u16::from_le_bytes(self.fee) }
    #[inline(always)]
    pub fn authority(&self) -> &Address { &self.authority }
    #[inline(always)]
    pub fn mint_a(&self) -> &Address { &self.mint_a }
    #[inline(always)]
    pub fn mint_b(&self) -> &Address { &self.mint_b }
    #[inline(always)]
    pub fn reserve_a(&self) -> u64 { u64::from_le_bytes(self.reserve_a) }
    #[inline(always)]
    pub fn reserve_b(&self) -> u64 { u64::from_le_bytes(self.reserve_b) }
    #[inline(always)]
    pub fn total_shares(&self) -> u64 { u64::from_le_bytes(self.total_shares) }

    pub fn curve(&self) -> ConstantProductCurve {
        ConstantProductCurve {
            reserve_a: self.reserve_a(),
            reserve_b: self.reserve_b(),
            total_shares: self.total_shares(),
            fee_bps: self.fee(),
        }
    }

    // =========================== WRITING DATA ====================
    // Return mutable Pool from given bytes.
    #[inline(always)]
    pub unsafe fn from_bytes_unchecked_mut(bytes: &mut [u8]) -> &mut Self {
        &mut *(bytes.as_mut_ptr() as *mut Pool)
    }

    #[inline(always)]
    pub fn load_mut(account_info: &AccountView) -> Result<&mut Self, AmmProgramError> {
        Self::check_account(account_info)?;
        let mut data = account_info.try_borrow_mut()?;
        Ok(unsafe { &mut *(data.as_mut_ptr() as *mut Pool) })
    }

    /// Moves an Uninitialized pool to Active with empty reserves.
    pub fn initialize(
        &mut self, fee: u16, authority: &Address,
        mint_a: &Address, mint_b: &Address, bump: [u8; 1],
    ) -> Result<(), AmmProgramError> {
        if self.state != PoolStatus::Uninitialized as u8 {
            return Err(AmmProgramError::AlreadyInitialized);
        }
        if fee >= BPS_DENOMINATOR {
            return Err(AmmProgramError::InvalidAmount);
        }
        self.state = PoolStatus::Active.into();
        self.bump = bump;
        self.fee = fee.to_le_bytes();
        self.authority = authority.clone();
        self.mint_a = mint_a.clone();
        self.mint_b = mint_b.clone();
        self.reserve_a = 0u64.to_le_bytes();
        self.reserve_b = 0u64.to_le_bytes();
        self.total_shares = 0u64.to_le_bytes();
        Ok(())
    }

    /// The only writer of reserves and share supply. Rejects any combination
    /// where shares exist without both reserves, or reserves without shares,
    /// and leaves the record untouched in that case.
    pub fn set_liquidity(
        &mut self, reserve_a: u64, reserve_b: u64, total_shares: u64,
    ) -> Result<(), AmmProgramError> {
        Self::check_liquidity(reserve_a, reserve_b, total_shares)?;
        self.reserve_a = reserve_a.to_le_bytes();
        self.reserve_b = reserve_b.to_le_bytes();
        self.total_shares = total_shares.to_le_bytes();
        Ok(())
    }

    #[inline(always)]
    pub fn check_liquidity(reserve_a: u64, reserve_b: u64, total_shares: u64) -> Result<(), AmmProgramError> {
        let empty = total_shares == 0;
        if empty != (reserve_a == 0) || empty != (reserve_b == 0) {
            return Err(AmmProgramError::InvalidPoolState);
        }
        Ok(())
    }
}

//! In-memory accounts for exercising account validation without a runtime.
//! Each account is laid out the way the loader serializes it: the
//! `RuntimeAccount` header immediately followed by the data.
use core::mem::size_of;
use pinocchio::{
    account::{RuntimeAccount, NOT_BORROWED},
    AccountView, Address,
};

use crate::state::{Pool, Position};

pub struct TestAccount {
    // u64 words keep the header 8-byte aligned.
    buffer: Vec<u64>,
}

impl TestAccount {
    pub fn new(address: &Address, owner: &Address, is_signer: bool, data: &[u8]) -> Self {
        let header = size_of::<RuntimeAccount>();
        let mut buffer = vec![0u64; (header + data.len()).div_ceil(8)];
        let raw = buffer.as_mut_ptr() as *mut RuntimeAccount;
        unsafe {
            raw.write(RuntimeAccount {
                borrow_state: NOT_BORROWED,
                is_signer: is_signer as u8,
                is_writable: 1,
                executable: 0,
                resize_delta: 0,
                address: address.clone(),
                owner: owner.clone(),
                lamports: 1_000_000,
                data_len: data.len() as u64,
            });
            core::ptr::copy_nonoverlapping(data.as_ptr(), (raw as *mut u8).add(header), data.len());
        }
        Self { buffer }
    }

    /// A wallet or program id: no data, owned by the system program.
    pub fn wallet(address: &Address, is_signer: bool) -> Self {
        Self::new(address, &pinocchio_system::ID, is_signer, &[])
    }

    /// A legacy token account. Validation only looks at owner and length.
    pub fn token_account(address: &Address) -> Self {
        Self::new(
            address, &pinocchio_token::ID, false,
            &[0u8; pinocchio_token::state::TokenAccount::LEN],
        )
    }

    pub fn mint(address: &Address) -> Self {
        Self::new(address, &pinocchio_token::ID, false, &[0u8; pinocchio_token::state::Mint::LEN])
    }

    pub fn view(&mut self) -> AccountView {
        unsafe { AccountView::new_unchecked(self.buffer.as_mut_ptr() as *mut RuntimeAccount) }
    }
}

pub fn address(byte: u8) -> Address {
    Address::new_from_array([byte; 32])
}

pub fn ata(wallet: &Address, mint: &Address) -> Address {
    Address::find_program_address(
        &[wallet.as_ref(), pinocchio_token::ID.as_ref(), mint.as_ref()],
        &pinocchio_associated_token_account::ID,
    ).0
}

pub fn pool_address(mint_a: &Address, mint_b: &Address) -> (Address, u8) {
    Address::find_program_address(
        &[crate::helpers::constants::POOL_SEED, mint_a.as_ref(), mint_b.as_ref()],
        &crate::PROGRAM_ADDRESS,
    )
}

pub fn position_address(pool: &Address, owner: &Address) -> (Address, u8) {
    Address::find_program_address(
        &[crate::helpers::constants::POSITION_SEED, pool.as_ref(), owner.as_ref()],
        &crate::PROGRAM_ADDRESS,
    )
}

/// A pool over mints `[1; 32]` and `[2; 32]` at its canonical address.
pub struct PoolFixture {
    pub mint_a: Address,
    pub mint_b: Address,
    pub pool: Address,
    pub bump: u8,
}

impl PoolFixture {
    pub fn new() -> Self {
        let mint_a = address(1);
        let mint_b = address(2);
        let (pool, bump) = pool_address(&mint_a, &mint_b);
        Self { mint_a, mint_b, pool, bump }
    }

    pub fn pool_account(&self, reserve_a: u64, reserve_b: u64, total_shares: u64) -> TestAccount {
        let mut data = [0u8; Pool::LEN];
        let pool = unsafe { Pool::from_bytes_unchecked_mut(&mut data) };
        pool.initialize(30, &address(9), &self.mint_a, &self.mint_b, [self.bump]).unwrap();
        pool.set_liquidity(reserve_a, reserve_b, total_shares).unwrap();
        TestAccount::new(&self.pool, &crate::PROGRAM_ADDRESS, false, &data)
    }

    /// `owner`'s position, stored at the position address of `holder`.
    pub fn position_account(&self, holder: &Address, owner: &Address, shares: u64) -> TestAccount {
        let (position_address, bump) = position_address(&self.pool, holder);
        let mut data = [0u8; Position::LEN];
        let position = unsafe { Position::from_bytes_unchecked_mut(&mut data) };
        position.initialize(&self.pool, owner, [bump]).unwrap();
        position.set_shares(shares);
        TestAccount::new(&position_address, &crate::PROGRAM_ADDRESS, false, &data)
    }

    pub fn vault_a(&self) -> TestAccount {
        TestAccount::token_account(&ata(&self.pool, &self.mint_a))
    }

    pub fn vault_b(&self) -> TestAccount {
        TestAccount::token_account(&ata(&self.pool, &self.mint_b))
    }
}

pub fn views(accounts: &mut [TestAccount]) -> Vec<AccountView> {
    accounts.iter_mut().map(TestAccount::view).collect()
}

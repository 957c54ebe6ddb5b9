//! This is the program's entrypoint.
#![cfg_attr(not(feature = "std"), no_std)]

use pinocchio::{
    Address, AccountView, ProgramResult, error::ProgramError,
};
use pinocchio_pubkey::declare_id;

pub mod helpers;
pub mod instructions;
pub mod state;
use instructions::{
    initialize::Initialize,
    deposit::Deposit,
    withdraw::Withdraw,
    swap::Swap,
};

declare_id!("BWYxEA3HTy5Kv7LCTWH68yN52a7aZMMPFCaUrWGmFtfK");

pub const PROGRAM_ADDRESS: Address = Address::new_from_array(ID);

#[cfg(not(feature = "no-entrypoint"))]
pinocchio::entrypoint!(process_instructions);

pub fn process_instructions(
    _program_id: &Address,
    accounts: &[AccountView],
    instruction_data: &[u8]
) -> ProgramResult {
    match instruction_data.split_first() {
        Some((Initialize::DISCRIMINATOR, data)) => Initialize::try_from((data, accounts))?.process(),
        Some((Deposit::DISCRIMINATOR, data)) => Deposit::try_from((data, accounts))?.process(),
        Some((Withdraw::DISCRIMINATOR, data)) => Withdraw::try_from((data, accounts))?.process(),
        Some((Swap::DISCRIMINATOR, data)) => Swap::try_from((data, accounts))?.process(),
        _ => Err(ProgramError::InvalidInstructionData),
    }
}

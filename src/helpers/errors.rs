//! Defining the program's errors.
use pinocchio::error::ProgramError as P;

// All fields will be of type u32
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmmProgramError {
    InvalidInstructionData = 1,
    InvalidOwner = 2,
    Unauthorized = 3,
    InvalidAccountData = 4,
    InvalidAddress = 5,
    NotEnoughAccountKeys = 6,
    InvalidSignature = 7,
    // Pool lifecycle.
    AlreadyInitialized = 8,
    PoolNotInitialized = 9,
    InvalidMintOrder = 10,
    Expired = 11,
    // Pool math and user bounds.
    InvalidAmount = 12,
    InsufficientLiquidity = 13,
    InsufficientShares = 14,
    SlippageExceeded = 15,
    Overflow = 16,
    Underflow = 17,
    DivisionByZero = 18,
    InvalidPoolState = 19,
}

impl AmmProgramError {
    /// Whether resubmitting with different parameters can succeed.
    /// Arithmetic and pool state failures point to a bug instead.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AmmProgramError::Expired
                | AmmProgramError::InvalidAmount
                | AmmProgramError::InsufficientLiquidity
                | AmmProgramError::InsufficientShares
                | AmmProgramError::SlippageExceeded
        )
    }
}

impl From<AmmProgramError> for P {
    fn from(e: AmmProgramError) -> Self {
        P::Custom(e as u32)
    }
}

impl From<P> for AmmProgramError {
    fn from(e: P) -> Self {
        match e {
            P::AccountBorrowFailed => AmmProgramError::Unauthorized,
            P::MissingRequiredSignature => AmmProgramError::InvalidSignature,
            P::InvalidInstructionData => AmmProgramError::InvalidInstructionData,
            P::NotEnoughAccountKeys => AmmProgramError::NotEnoughAccountKeys,
            P::IncorrectProgramId => AmmProgramError::InvalidAddress,
            _ => AmmProgramError::InvalidAccountData,
        }
    }
}

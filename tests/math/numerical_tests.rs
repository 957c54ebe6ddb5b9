use proptest::prelude::*;
use solana_amm::helpers::errors::AmmProgramError;
use solana_amm::helpers::math_procs::numerical_ops::*;

// MUL DIV TESTS
#[test]
fn test_mul_div_basic() {
    assert_eq!(mul_div_floor(10, 20, 7).unwrap(), 28);
    assert_eq!(mul_div_ceil(10, 20, 7).unwrap(), 29);
    assert_eq!(mul_div(10, 20, 5, Rounding::Up).unwrap(), 40);
}

#[test]
fn test_mul_div_division_by_zero() {
    assert_eq!(mul_div(1, 2, 0, Rounding::Down), Err(AmmProgramError::DivisionByZero));
}

// CONSTANT PRODUCT TESTS
#[test]
fn test_constant_product_basic() {
    assert_eq!(constant_product(10, 20), 200);
    assert_eq!(constant_product(0, 20), 0);
}

proptest! {
    #[test]
    fn mul_div_matches_exact_division(a in any::<u64>(), b in any::<u64>(), d in 1u64..) {
        let exact = (a as u128) * (b as u128);
        let floor = mul_div_floor(a as u128, b as u128, d as u128).unwrap();
        let ceil = mul_div_ceil(a as u128, b as u128, d as u128).unwrap();
        prop_assert_eq!(floor, exact / d as u128);
        prop_assert!(ceil == floor || ceil == floor + 1);
        prop_assert_eq!(ceil == floor, exact % d as u128 == 0);
    }

    #[test]
    fn isqrt_is_floor_root(value in any::<u128>()) {
        let root = isqrt(value);
        prop_assert!(root <= u64::MAX as u128);
        prop_assert!(root * root <= value);
        let next = root + 1;
        prop_assert!(next.checked_mul(next).map_or(true, |square| square > value));
    }
}

use pinocchio::Address;
use proptest::prelude::*;
use solana_amm::helpers::math_procs::SwapDirection;
use solana_amm::instructions::{apply_deposit, apply_swap, apply_withdraw};
use solana_amm::state::{Pool, Position};

const PROVIDERS: usize = 3;

#[derive(Clone, Debug)]
enum Op {
    Deposit { provider: usize, amount_a: u64, amount_b: u64 },
    Withdraw { provider: usize, shares: u64 },
    Swap { amount_in: u64, a_to_b: bool },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..PROVIDERS, 1u64..1_000_000_000, 1u64..1_000_000_000)
            .prop_map(|(provider, amount_a, amount_b)| Op::Deposit { provider, amount_a, amount_b }),
        (0..PROVIDERS, 1u64..1_000_000_000)
            .prop_map(|(provider, shares)| Op::Withdraw { provider, shares }),
        (1u64..1_000_000_000, any::<bool>())
            .prop_map(|(amount_in, a_to_b)| Op::Swap { amount_in, a_to_b }),
    ]
}

fn snapshot(pool: &Pool, positions: &[&mut Position]) -> (u64, u64, u64, Vec<u64>) {
    (
        pool.reserve_a(),
        pool.reserve_b(),
        pool.total_shares(),
        positions.iter().map(|p| p.shares()).collect(),
    )
}

proptest! {
    #[test]
    fn pool_invariants_hold_for_any_sequence(
        fee in 0u16..1_000,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut pool_data = [0u8; Pool::LEN];
        let pool = unsafe { Pool::from_bytes_unchecked_mut(&mut pool_data) };
        pool.initialize(
            fee, &Address::new_from_array([9u8; 32]),
            &Address::new_from_array([1u8; 32]), &Address::new_from_array([2u8; 32]), [255],
        ).unwrap();

        let mut position_data = [[0u8; Position::LEN]; PROVIDERS];
        let mut positions: Vec<&mut Position> = position_data
            .iter_mut()
            .enumerate()
            .map(|(i, data)| {
                let position = unsafe { Position::from_bytes_unchecked_mut(data) };
                position.initialize(
                    &Address::new_from_array([3u8; 32]),
                    &Address::new_from_array([10 + i as u8; 32]),
                    [250],
                ).unwrap();
                position
            })
            .collect();

        for op in ops {
            let before = snapshot(pool, &positions);
            let k_before = pool.curve().k();
            let result = match op {
                Op::Deposit { provider, amount_a, amount_b } => {
                    apply_deposit(pool, &mut *positions[provider], amount_a, amount_b, 0).map(|_| ())
                }
                Op::Withdraw { provider, shares } => {
                    apply_withdraw(pool, &mut *positions[provider], shares, 0, 0).map(|_| ())
                }
                Op::Swap { amount_in, a_to_b } => {
                    let direction = if a_to_b { SwapDirection::AtoB } else { SwapDirection::BtoA };
                    apply_swap(pool, amount_in, 0, direction).map(|quote| {
                        // Swaps leave the share supply alone and never shrink k.
                        assert!(pool.curve().k() >= k_before);
                        assert_eq!(quote.amount_in, amount_in);
                    })
                }
            };

            if result.is_err() {
                // Failed operations leave every record as it was.
                prop_assert_eq!(snapshot(pool, &positions), before);
            }

            let total: u64 = positions.iter().map(|p| p.shares()).sum();
            prop_assert_eq!(total, pool.total_shares());
            let empty = pool.total_shares() == 0;
            prop_assert_eq!(empty, pool.reserve_a() == 0);
            prop_assert_eq!(empty, pool.reserve_b() == 0);
        }
    }
}

//! Algebraic identities between the operators, checked on every tier.

use std::fmt::Debug;

use bytemuck::Pod;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simdbits::{supported_tiers, BitwiseOp, Engine, Lane};

fn random_words(seed: u64, count: usize) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random()).collect()
}

fn run(engine: Engine, op: BitwiseOp, origin: &[u32], mask: u32) -> Vec<u32> {
    let mut target = vec![0u32; origin.len()];
    engine.apply(op, origin, &mut target, mask).unwrap();
    target
}

#[test]
fn test_double_not_in_place_is_identity() {
    for tier in supported_tiers() {
        let engine = Engine::with_tier(tier).unwrap();

        for count in [0, 1, 3, 8, 9, 63, 64, 65, 500] {
            let original = random_words(count as u64, count);
            let mut buffer = original.clone();

            engine.apply_in_place(BitwiseOp::Not, &mut buffer, 0);
            if count > 0 {
                assert_ne!(buffer, original);
            }
            engine.apply_in_place(BitwiseOp::Not, &mut buffer, 0);

            assert_eq!(buffer, original, "{tier}, count {count}");
        }
    }
}

#[test]
fn test_de_morgan() {
    let origin = random_words(7, 301);

    for tier in supported_tiers() {
        let engine = Engine::with_tier(tier).unwrap();

        for mask in [0u32, u32::MAX, 0x0F0F_F0F0, 0x8000_0001] {
            let inverted = run(engine, BitwiseOp::Not, &origin, 0);

            // NAND(x, m) == OR(!x, !m)
            assert_eq!(
                run(engine, BitwiseOp::Nand, &origin, mask),
                run(engine, BitwiseOp::Or, &inverted, !mask),
                "{tier}"
            );
            // NOR(x, m) == AND(!x, !m)
            assert_eq!(
                run(engine, BitwiseOp::Nor, &origin, mask),
                run(engine, BitwiseOp::And, &inverted, !mask),
                "{tier}"
            );
            // XNOR(x, m) == XOR(x, !m)
            assert_eq!(
                run(engine, BitwiseOp::Xnor, &origin, mask),
                run(engine, BitwiseOp::Xor, &origin, !mask),
                "{tier}"
            );
        }
    }
}

#[test]
fn test_xor_twice_restores() {
    let original = random_words(11, 129);

    for tier in supported_tiers() {
        let engine = Engine::with_tier(tier).unwrap();
        let mut buffer = original.clone();

        engine.apply_in_place(BitwiseOp::Xor, &mut buffer, 0xDEAD_BEEF);
        engine.apply_in_place(BitwiseOp::Xor, &mut buffer, 0xDEAD_BEEF);

        assert_eq!(buffer, original, "{tier}");
    }
}

#[test]
fn test_remainder_isolation() {
    const SENTINEL: u16 = 0x5A5A;
    const GUARD: usize = 40;

    let mut rng = StdRng::seed_from_u64(99);

    for tier in supported_tiers() {
        let engine = Engine::with_tier(tier).unwrap();

        for count in 0..=70 {
            let origin: Vec<u16> = (0..count).map(|_| rng.random()).collect();

            for op in BitwiseOp::ALL {
                let mut target = vec![SENTINEL; count + GUARD];
                engine.apply(op, &origin, &mut target, 0x00FF).unwrap();

                assert!(
                    target[count..].iter().all(|&v| v == SENTINEL),
                    "{op} on {tier} wrote past {count} elements"
                );
            }
        }
    }
}

/// Changing only the tail of the input leaves the bulk of the output alone,
/// and changing only the bulk leaves the tail alone.
fn check_bulk_tail_independent<L: Lane + Pod + Debug>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);

    for tier in supported_tiers() {
        let engine = Engine::with_tier(tier).unwrap();
        let lanes = tier.lanes(L::WIDTH);
        if lanes < 2 {
            continue;
        }

        let mut remainders = vec![1, lanes / 2, lanes - 1];
        remainders.dedup();

        for k in 0..=3 {
            for &r in &remainders {
                let count = k * lanes + r;
                let bulk = count - count % lanes;
                assert_eq!(bulk, k * lanes);

                let mut origin = vec![L::zero(); count];
                rng.fill(bytemuck::cast_slice_mut::<L, u8>(&mut origin));
                let mask = origin[0] ^ L::max_value();

                for op in BitwiseOp::ALL {
                    let mut baseline = vec![L::zero(); count];
                    engine.apply(op, &origin, &mut baseline, mask).unwrap();

                    let mut tail_changed = origin.clone();
                    tail_changed[bulk..].iter_mut().for_each(|v| *v = !*v);
                    let mut target = vec![L::zero(); count];
                    engine.apply(op, &tail_changed, &mut target, mask).unwrap();
                    assert_eq!(
                        target[..bulk],
                        baseline[..bulk],
                        "{op} on {tier}: tail input changed the bulk, count {count}"
                    );

                    let mut bulk_changed = origin.clone();
                    bulk_changed[..bulk].iter_mut().for_each(|v| *v = !*v);
                    let mut target = vec![L::zero(); count];
                    engine.apply(op, &bulk_changed, &mut target, mask).unwrap();
                    assert_eq!(
                        target[bulk..],
                        baseline[bulk..],
                        "{op} on {tier}: bulk input changed the tail, count {count}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_bulk_and_tail_are_independent() {
    check_bulk_tail_independent::<u8>(21);
    check_bulk_tail_independent::<u16>(22);
    check_bulk_tail_independent::<u32>(23);
    check_bulk_tail_independent::<u64>(24);
}

#[test]
fn test_range_leaves_outside_untouched() {
    let origin = random_words(5, 100);

    for tier in supported_tiers() {
        let engine = Engine::with_tier(tier).unwrap();
        let mut target = vec![7u32; 100];

        engine
            .apply_range(BitwiseOp::Or, &origin, &mut target, 1, 13, 37)
            .unwrap();

        assert!(target[..13].iter().all(|&v| v == 7));
        assert!(target[50..].iter().all(|&v| v == 7));
        for i in 13..50 {
            assert_eq!(target[i], origin[i] | 1);
        }
    }
}

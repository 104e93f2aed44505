use proptest::prelude::*;

use crate::{
    AccessOutcome, HierarchyConfig, MemoryLayer, StandardHierarchy,
    build_hierarchy,
};

#[derive(Debug, Clone)]
enum Op {
    Read(usize),
    Write(usize, u32),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0_usize..16).prop_map(Op::Read),
        (0_usize..16, any::<u32>()).prop_map(|(a, d)| Op::Write(a, d)),
    ]
}

fn arb_sets() -> impl Strategy<Value = usize> {
    prop_oneof![Just(1_usize), Just(2), Just(4)]
}

proptest! {
    #[test]
    fn exec_time_never_decreases(
        sets in arb_sets(),
        ops in prop::collection::vec(arb_op(), 0..64)
    ) {
        let config = HierarchyConfig::builder().set_count(sets).build();
        let mut cache: StandardHierarchy<u32> =
            build_hierarchy(&config).unwrap();
        let mut last = cache.get_exec_time();
        for op in ops {
            match op {
                Op::Read(a) => { cache.read(a)?; }
                Op::Write(a, d) => cache.write(a, d)?,
            }
            let now = cache.get_exec_time();
            prop_assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn reads_agree_with_a_flat_memory(
        sets in arb_sets(),
        ops in prop::collection::vec(arb_op(), 0..64)
    ) {
        let config = HierarchyConfig::builder().set_count(sets).build();
        let mut cache: StandardHierarchy<u32> =
            build_hierarchy(&config).unwrap();
        let mut model = [0_u32; 16];
        for op in ops {
            match op {
                Op::Read(a) => prop_assert_eq!(cache.read(a)?, model[a]),
                Op::Write(a, d) => {
                    cache.write(a, d)?;
                    model[a] = d;
                }
            }
        }
        prop_assert_eq!(cache.backing().cells(), &model[..]);
    }

    #[test]
    fn cost_is_cache_latency_plus_memory_round_trips(
        sets in arb_sets(),
        ops in prop::collection::vec(arb_op(), 0..64)
    ) {
        let config = HierarchyConfig::builder()
            .set_count(sets)
            .cache_latency(1.0)
            .memory_latency(10.0)
            .build();
        let mut cache: StandardHierarchy<u32> =
            build_hierarchy(&config).unwrap();
        let mut memory_trips = 0_u32;
        let total = ops.len();
        for op in ops {
            match op {
                Op::Read(a) => {
                    cache.read(a)?;
                    if cache.last_outcome() == Some(AccessOutcome::Miss) {
                        memory_trips += 1;
                    }
                }
                Op::Write(a, d) => {
                    cache.write(a, d)?;
                    memory_trips += 1;
                }
            }
        }
        let expected = total as f64 + 10.0 * f64::from(memory_trips);
        prop_assert_eq!(cache.get_exec_time(), expected);
    }
}

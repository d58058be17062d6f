//! Property-based tests for flat wire numbering.

use proptest::prelude::*;
use qviz_ir::{RegisterRef, RegisterTable};

/// Distinct register names with widths 1..=6.
fn arb_registers() -> impl Strategy<Value = Vec<(String, u32)>> {
    prop::collection::vec(1_u32..=6, 1..=6).prop_map(|widths| {
        widths
            .into_iter()
            .enumerate()
            .map(|(i, w)| (format!("r{i}"), w))
            .collect()
    })
}

proptest! {
    /// The flat wire count is the sum of declared widths.
    #[test]
    fn test_total_width_is_sum(registers in arb_registers()) {
        let expected: u64 = registers.iter().map(|(_, w)| u64::from(*w)).sum();
        let table: RegisterTable = registers.into_iter().collect();
        prop_assert_eq!(table.total_width(), expected);
    }

    /// Every wire of every register resolves to a distinct flat index, and
    /// together they cover `0..total_width` exactly once.
    #[test]
    fn test_resolution_is_a_bijection(registers in arb_registers()) {
        let table: RegisterTable = registers.clone().into_iter().collect();
        let mut seen = vec![false; table.total_width() as usize];

        for (name, width) in &registers {
            for i in 0..*width {
                let range = table.resolve(&RegisterRef::single(name.clone(), i)).unwrap();
                prop_assert_eq!(range.end - range.start, 1);
                let wire = range.start as usize;
                prop_assert!(!seen[wire], "wire {} resolved twice", wire);
                seen[wire] = true;
            }
        }

        prop_assert!(seen.into_iter().all(|s| s));
    }

    /// A whole-register reference covers exactly its own wires.
    #[test]
    fn test_whole_register_range(registers in arb_registers()) {
        let table: RegisterTable = registers.clone().into_iter().collect();
        for (name, width) in &registers {
            let range = table.resolve(&RegisterRef::register(name.clone())).unwrap();
            prop_assert_eq!(range.end - range.start, *width);
            prop_assert_eq!(Some(range.start), table.offset_of(name));
        }
    }
}

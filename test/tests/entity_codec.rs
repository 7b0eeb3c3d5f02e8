//! PROPERTY-BASED TESTS: Entity identity codec
//!
//! Key invariants:
//! 1. pack/unpack is a bijection over the valid lo/hi ranges
//! 2. Out-of-range halves are truncated by masking, never rejected

use proptest::prelude::*;
use patchwork_shared::{pack, unpack_hi, unpack_lo, Entity, HI_MASK, LO_EXTENT, LO_MASK};

proptest! {
    #[test]
    fn prop_pack_unpack_round_trips(lo in 0..=LO_MASK, hi in 0..=HI_MASK) {
        let id = pack(lo, hi);

        prop_assert_eq!(unpack_lo(id), lo);
        prop_assert_eq!(unpack_hi(id), hi);
    }

    #[test]
    fn prop_entity_halves_match_codec(lo in 0..=LO_MASK, hi in 0..=HI_MASK) {
        let entity = Entity::new(lo, hi);

        prop_assert_eq!(entity.lo(), lo);
        prop_assert_eq!(entity.hi(), hi);
        prop_assert_eq!(Entity::from_u32(entity.to_u32()), entity);
    }

    #[test]
    fn prop_out_of_range_input_is_masked(lo in any::<u32>(), hi in any::<u32>()) {
        let id = pack(lo, hi);

        prop_assert_eq!(unpack_lo(id), lo & LO_MASK);
        prop_assert_eq!(unpack_hi(id), hi & HI_MASK);
        // ids never use the top bit
        prop_assert!(id < (1 << 31));
    }

    #[test]
    fn prop_distinct_pairs_give_distinct_ids(
        a in (0..=LO_MASK, 0..=HI_MASK),
        b in (0..=LO_MASK, 0..=HI_MASK),
    ) {
        prop_assume!(a != b);

        prop_assert_ne!(pack(a.0, a.1), pack(b.0, b.1));
    }
}

#[test]
fn pack_places_hi_above_lo() {
    let id = pack(5, 3);

    assert_eq!(id, (3 << 20) | 5);
    assert_eq!(LO_EXTENT, 20);
    assert_eq!(unpack_hi(id), 3);
    assert_eq!(unpack_lo(id), 5);
}

#[test]
fn entity_debug_shows_relation_half_only_when_set() {
    assert_eq!(format!("{:?}", Entity::new(7, 0)), "Entity(7)");
    assert_eq!(format!("{:?}", Entity::new(7, 2)), "Entity(7:2)");
}

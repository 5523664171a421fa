//! Sticker allocation

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick a sticker the player does not own yet; once the whole catalog is
/// owned, pick any sticker again. Returns `None` only for an empty catalog.
pub fn allocate<R: Rng + ?Sized>(
    owned: &BTreeSet<String>,
    catalog: &[&'static str],
    rng: &mut R,
) -> Option<&'static str> {
    let available: Vec<&'static str> = catalog
        .iter()
        .copied()
        .filter(|token| !owned.contains(*token))
        .collect();

    if available.is_empty() {
        catalog.choose(rng).copied()
    } else {
        available.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::REWARD_STICKERS;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn owned(tokens: &[&str]) -> BTreeSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_last_missing_sticker_is_always_chosen() {
        let mut rng = Pcg32::seed_from_u64(7);
        let all_but_one = owned(&REWARD_STICKERS[1..]);
        for _ in 0..50 {
            assert_eq!(allocate(&all_but_one, &REWARD_STICKERS, &mut rng), Some(REWARD_STICKERS[0]));
        }
    }

    #[test]
    fn test_full_collection_falls_back_to_repeat() {
        let mut rng = Pcg32::seed_from_u64(7);
        let everything = owned(&REWARD_STICKERS);
        let token = allocate(&everything, &REWARD_STICKERS, &mut rng);
        assert!(token.is_some_and(|t| REWARD_STICKERS.contains(&t)));
    }

    #[test]
    fn test_empty_catalog_yields_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(allocate(&BTreeSet::new(), &[], &mut rng), None);
    }

    proptest! {
        #[test]
        fn prop_prefers_unowned(seed: u64, mask in 0u16..(1 << 12)) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let held: Vec<&str> = REWARD_STICKERS
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, t)| *t)
                .collect();
            let held = owned(&held);
            let token = allocate(&held, &REWARD_STICKERS, &mut rng).unwrap();
            prop_assert!(REWARD_STICKERS.contains(&token));
            if held.len() < REWARD_STICKERS.len() {
                prop_assert!(!held.contains(token));
            }
        }
    }
}

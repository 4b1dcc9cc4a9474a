//! Tests for candidate eligibility and nearest-color selection

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use photomosaic::cache::{CandidateTile, TileCache};
    use photomosaic::color::{Color, ColorClassBounds};
    use photomosaic::mosaic::matcher::{
        MatchOutcome, find_best_candidate, is_eligible, match_tile,
    };

    fn solid(name: &str, color: [u8; 3]) -> CandidateTile {
        CandidateTile::from_pixels(
            name,
            RgbImage::from_pixel(2, 2, Rgb(color)),
            &ColorClassBounds::default(),
        )
    }

    fn cache_of(tiles: Vec<CandidateTile>) -> TileCache {
        TileCache::from_retained(tiles, 2, 2, ColorClassBounds::default()).unwrap()
    }

    fn rgb_cache() -> TileCache {
        cache_of(vec![
            solid("red", [255, 0, 0]),
            solid("green", [0, 255, 0]),
            solid("blue", [0, 0, 255]),
        ])
    }

    fn run(cache: &mut TileCache, target: Color, allow_reuse: bool) -> MatchOutcome {
        let class = cache.bounds().classify(target);
        match_tile(cache, target, class, allow_reuse)
    }

    // Tests the closest candidate in the target's class is chosen and claimed
    // Verified by choosing the farthest candidate
    #[test]
    fn test_closest_candidate_selected() {
        let mut cache = rgb_cache();
        let outcome = run(&mut cache, [250.0, 5.0, 5.0], false);

        assert_eq!(outcome.candidate_index(), Some(0));
        assert!(cache.candidates().first().is_some_and(CandidateTile::is_used));
        assert_eq!(cache.used_count(), 1);
    }

    // Tests an exhausted class falls back to the best free candidate anywhere
    // Verified by returning a placeholder once the class is used up
    #[test]
    fn test_exhausted_class_falls_back() {
        let mut cache = rgb_cache();
        run(&mut cache, [250.0, 5.0, 5.0], false);
        let second = run(&mut cache, [250.0, 5.0, 5.0], false);

        // Green and blue are equidistant; the earlier one wins
        match second {
            MatchOutcome::Tile(selection) => {
                assert_eq!(selection.index, 1);
                assert!(selection.class_waived);
            }
            MatchOutcome::Placeholder => unreachable!("free candidates remain"),
        }
    }

    // Tests reuse mode neither reads nor writes used flags
    // Verified by marking candidates used in reuse mode
    #[test]
    fn test_reuse_leaves_flags_untouched() {
        let mut cache = rgb_cache();
        for _ in 0..3 {
            let outcome = run(&mut cache, [250.0, 5.0, 5.0], true);
            assert_eq!(outcome.candidate_index(), Some(0));
        }
        assert_eq!(cache.used_count(), 0);
    }

    // Tests a target class with no members waives the class restriction
    // Verified by returning a placeholder for unoccupied classes
    #[test]
    fn test_empty_class_waived() {
        let mut cache = cache_of(vec![solid("red", [255, 0, 0]), solid("green", [0, 128, 0])]);
        let target = [0.0, 60.0, 200.0];
        assert!(!cache.is_class_occupied(cache.bounds().classify(target)));

        match run(&mut cache, target, false) {
            MatchOutcome::Tile(selection) => {
                assert_eq!(selection.index, 1);
                assert!(selection.class_waived);
            }
            MatchOutcome::Placeholder => unreachable!("the waiver should find green"),
        }
    }

    // Tests the class restriction wins over a globally closer candidate
    // Verified by always searching every class
    #[test]
    fn test_class_restriction_applies() {
        let cache = cache_of(vec![solid("blueish", [0, 0, 110]), solid("navy", [0, 0, 60])]);
        // Blue 100 shares the (51, 102] interval with 60, not with 110
        let target = [0.0, 0.0, 100.0];
        let selection = find_best_candidate(&cache, target, cache.bounds().classify(target), false);
        assert_eq!(selection.map(|s| s.index), Some(1));
        assert_eq!(selection.map(|s| s.class_waived), Some(false));
    }

    // Tests equal distances resolve to the earliest candidate
    // Verified by keeping the last minimum
    #[test]
    fn test_ties_prefer_first() {
        let mut cache = cache_of(vec![solid("one", [10, 10, 10]), solid("two", [10, 10, 10])]);
        assert_eq!(run(&mut cache, [10.0, 10.0, 10.0], true).candidate_index(), Some(0));
    }

    // Tests an empty cache yields a placeholder
    // Verified by panicking on empty candidate lists
    #[test]
    fn test_empty_cache_placeholder() {
        let mut cache = cache_of(Vec::new());
        assert!(run(&mut cache, [1.0, 2.0, 3.0], false).is_placeholder());
    }

    // Tests an exhausted pool yields a placeholder
    // Verified by ignoring used flags when everything is used
    #[test]
    fn test_exhausted_pool_placeholder() {
        let mut cache = cache_of(vec![solid("only", [5, 5, 5])]);
        assert_eq!(run(&mut cache, [5.0, 5.0, 5.0], false).candidate_index(), Some(0));
        assert!(run(&mut cache, [5.0, 5.0, 5.0], false).is_placeholder());
    }

    // Tests the eligibility rule directly
    // Verified by combining the two conditions with OR
    #[test]
    fn test_is_eligible() {
        let mut cache = cache_of(vec![solid("red", [255, 0, 0])]);
        let red_class = cache.bounds().classify([255.0, 0.0, 0.0]);
        let blue_class = cache.bounds().classify([0.0, 0.0, 255.0]);

        let red = cache.candidates().first().cloned().unwrap();
        assert!(is_eligible(&red, Some(red_class), false));
        assert!(!is_eligible(&red, Some(blue_class), false));
        assert!(is_eligible(&red, None, false));

        run(&mut cache, [255.0, 0.0, 0.0], false);
        let used = cache.candidates().first().cloned().unwrap();
        assert!(!is_eligible(&used, Some(red_class), false));
        assert!(is_eligible(&used, Some(red_class), true));
    }
}

use proptest::prelude::*;
use varta_layout_core::fitter::{body_breakpoints, fit, headline_tier, FitInput, HeadlineTier};

proptest! {
    #[test]
    fn fit_is_deterministic(headline in 0usize..500, body in 0usize..10_000, photo in any::<bool>()) {
        let input = FitInput::new(headline, body, photo);
        prop_assert_eq!(fit(input), fit(input));
    }

    #[test]
    fn longer_body_never_grows_font_or_shrinks_columns(
        a in 0usize..6_000,
        b in 0usize..6_000,
        photo in any::<bool>(),
    ) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        let p_short = fit(FitInput::new(0, short, photo));
        let p_long = fit(FitInput::new(0, long, photo));

        prop_assert!(p_long.body_font_px <= p_short.body_font_px);
        prop_assert!(p_long.column_count >= p_short.column_count);
        prop_assert!(p_long.photo_height_px <= p_short.photo_height_px);
        prop_assert!(p_long.line_height <= p_short.line_height);
    }

    #[test]
    fn headline_tier_ignores_body_and_photo(
        headline in 0usize..300,
        body_a in 0usize..8_000,
        body_b in 0usize..8_000,
        photo in any::<bool>(),
    ) {
        let a = fit(FitInput::new(headline, body_a, photo));
        let b = fit(FitInput::new(headline, body_b, !photo));
        prop_assert_eq!(a.headline_tier, b.headline_tier);
        prop_assert_eq!(a.headline_tier, headline_tier(headline));
    }

    #[test]
    fn photo_height_tracks_photo_flag(body in 0usize..8_000) {
        prop_assert_eq!(fit(FitInput::new(0, body, false)).photo_height_px, 0);
        prop_assert!(fit(FitInput::new(0, body, true)).photo_height_px >= 100);
    }

    #[test]
    fn column_count_stays_in_range(body in any::<usize>(), photo in any::<bool>()) {
        let params = fit(FitInput::new(0, body, photo));
        prop_assert!((1..=3).contains(&params.column_count));
    }
}

#[test]
fn every_breakpoint_resolves_to_the_lower_side() {
    for photo in [false, true] {
        for bp in body_breakpoints(photo) {
            let at = fit(FitInput::new(0, bp, photo));
            let below = fit(FitInput::new(0, bp - 1, photo));
            let above = fit(FitInput::new(0, bp + 1, photo));
            assert_eq!(at, below, "breakpoint {bp} (photo={photo}) should match bp-1");
            assert_ne!(at, above, "breakpoint {bp} (photo={photo}) should differ from bp+1");
        }
    }
}

#[test]
fn scenario_empty_body_without_photo() {
    let params = fit(FitInput::new(0, 0, false));
    assert_eq!(params.body_font_px, 24);
    assert_eq!(params.column_count, 1);
    assert_eq!(params.headline_tier, HeadlineTier::Large);
}

#[test]
fn scenario_long_body_with_photo() {
    let params = fit(FitInput::new(20, 2600, true));
    assert_eq!(params.body_font_px, 9);
    assert_eq!(params.column_count, 3);
    assert_eq!(params.photo_height_px, 100);
}

#[test]
fn scenario_medium_headline_regardless_of_body() {
    for body in [0, 750, 1600, 4000] {
        for photo in [false, true] {
            assert_eq!(
                fit(FitInput::new(45, body, photo)).headline_tier,
                HeadlineTier::Medium
            );
        }
    }
}

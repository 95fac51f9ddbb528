//! Property tests for band geometry

use export::{paginate, PageSetup, SinglePageAlign};
use proptest::prelude::*;

fn close(a: f64, b: f64, scale: f64) -> bool {
    (a - b).abs() <= 1e-9 * scale.max(1.0)
}

proptest! {
    #[test]
    fn bands_are_contiguous_and_cover_bitmap(
        bw in 1u32..4000,
        bh in 1u32..40000,
        aw in 10.0f64..400.0,
        ah in 10.0f64..400.0,
        margin in 0.0f64..30.0,
    ) {
        let plan = paginate(bw, bh, aw, ah, margin, SinglePageAlign::Center).unwrap();
        let bh = bh as f64;

        prop_assert_eq!(plan.placements[0].src_y, 0.0);
        for pair in plan.placements.windows(2) {
            prop_assert!(close(pair[0].src_y + pair[0].src_height, pair[1].src_y, bh));
        }
        let last = plan.placements.last().unwrap();
        prop_assert!(close(last.src_y + last.src_height, bh, bh));
        prop_assert!(plan.placements.iter().all(|p| p.src_height > 0.0 && p.height > 0.0));
        prop_assert!(plan.placements.iter().all(|p| p.width == aw && p.x == margin));
    }

    #[test]
    fn page_count_is_ceiling_of_image_height(
        bw in 1u32..4000,
        bh in 1u32..40000,
        aw in 10.0f64..400.0,
        ah in 10.0f64..400.0,
    ) {
        let plan = paginate(bw, bh, aw, ah, 10.0, SinglePageAlign::Center).unwrap();
        let n = plan.page_count();
        if plan.image_height <= ah {
            prop_assert_eq!(n, 1);
        } else {
            // Same arithmetic as the band loop
            prop_assert!(((n - 1) as f64) * ah < plan.image_height);
            prop_assert!((n as f64) * ah >= plan.image_height);
            prop_assert!(n >= 2);
        }
    }

    #[test]
    fn single_page_is_centred(
        bw in 100u32..4000,
        bh in 1u32..100,
        margin in 0.0f64..30.0,
    ) {
        let plan = paginate(bw, bh, 200.0, 200.0, margin, SinglePageAlign::Center).unwrap();
        prop_assert!(plan.is_single_page());
        let p = plan.placements[0];
        prop_assert!(close(p.y, margin + (200.0 - plan.image_height) / 2.0, 200.0));
        prop_assert_eq!(p.src_height, bh as f64);
    }

    #[test]
    fn geometry_is_idempotent(
        bw in 1u32..4000,
        bh in 1u32..40000,
        page in prop_oneof![Just(PageSetup::letter_portrait()), Just(PageSetup::letter_landscape())],
    ) {
        let first = export::paginate_for(bw, bh, &page, SinglePageAlign::Center).unwrap();
        let second = export::paginate_for(bw, bh, &page, SinglePageAlign::Center).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn pixel_rows_tile_bitmap(
        bw in 20u32..2000,
        bh in 1u32..20000,
        ah in 10.0f64..300.0,
    ) {
        let plan = paginate(bw, bh, 200.0, ah, 10.0, SinglePageAlign::Center).unwrap();

        let mut next = 0u32;
        for (i, p) in plan.placements.iter().enumerate() {
            let rows = plan.pixel_rows(i);
            prop_assert_eq!(rows.start, next);
            prop_assert!(rows.end >= rows.start);
            if p.src_height >= 1.0 {
                prop_assert!(!rows.is_empty());
            }
            next = rows.end;
        }
        prop_assert_eq!(next, bh);
    }
}

#[test]
fn exact_multiple_has_no_trailing_page() {
    // 200 px wide onto 100mm: 600 px tall is 300mm, three pages of 100mm
    let plan = paginate(200, 600, 100.0, 100.0, 10.0, SinglePageAlign::Center).unwrap();
    assert_eq!(plan.page_count(), 3);
    assert_eq!(plan.placements[2].height, 100.0);
}

#[test]
fn tall_capture_scenario() {
    let plan = paginate(1200, 3000, 277.0, 277.0, 10.0, SinglePageAlign::Center).unwrap();
    assert_eq!(plan.image_height, 692.5);
    assert_eq!(plan.page_count(), 3);
    assert!((plan.placements[2].height - 138.5).abs() < 1e-9);
}

//! Centered cover-crop computation.
//!
//! Independent of the grid layout: given a source size and a destination
//! size, [`cover_crop`] returns the sub-rectangle of the source that,
//! scaled to the destination, fills it exactly — no letterboxing and no
//! aspect distortion, at the cost of cropping the source's relatively
//! longer dimension.
//!
//! # Example
//!
//! ```
//! use tilegrid::{Size, cover_crop};
//!
//! // A 2:1 source into a square tile: keep the full height, crop the
//! // width to a centered square.
//! let crop = cover_crop(Size::new(400.0, 200.0), Size::new(600.0, 600.0)).unwrap();
//! assert_eq!((crop.x, crop.y), (100.0, 0.0));
//! assert_eq!((crop.width, crop.height), (200.0, 200.0));
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::layout::{LayoutError, Rect, Size};

/// Round a width/height ratio to three decimals.
///
/// Layout boxes carry float noise from the upstream resolution math;
/// comparing rounded ratios keeps "same aspect" sources on the no-crop
/// path instead of shaving sub-pixel slivers off them.
fn ratio_key(size: Size) -> f64 {
    (size.width / size.height * 1000.0).round()
}

/// Compute the centered sub-rectangle of `source` to sample so that,
/// scaled to `destination`, it covers it exactly.
///
/// Both heights must be positive. The destination is typically a layout
/// box from [`compute_layout`](crate::compute_layout); the returned rect
/// is in source pixel space, ready for a scaled image copy.
pub fn cover_crop(source: Size, destination: Size) -> Result<Rect, LayoutError> {
    if source.height <= 0.0 || destination.height <= 0.0 {
        return Err(LayoutError::InvalidCropHeight {
            source: source.height,
            destination: destination.height,
        });
    }

    let destination_ratio = destination.width / destination.height;
    let source_key = ratio_key(source);
    let destination_key = ratio_key(destination);

    if source_key == destination_key {
        // Same aspect: sample the whole source.
        Ok(Rect::new(0.0, 0.0, source.width, source.height))
    } else if source_key > destination_key {
        // Source is relatively wider: keep the full height, crop the width
        // to the destination's aspect and center horizontally.
        let width = source.height * destination_ratio;
        Ok(Rect {
            x: source.width / 2.0 - width / 2.0,
            y: 0.0,
            width,
            height: source.height,
        })
    } else {
        // Source is relatively narrower: keep the full width, crop the
        // height and center vertically.
        let height = source.width / destination_ratio;
        Ok(Rect {
            x: 0.0,
            y: source.height / 2.0 - height / 2.0,
            width: source.width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop(sw: f64, sh: f64, dw: f64, dh: f64) -> Rect {
        cover_crop(Size::new(sw, sh), Size::new(dw, dh)).unwrap()
    }

    // ── same aspect ratio ───────────────────────────────────────────────

    #[test]
    fn same_ratio_same_size() {
        assert_eq!(crop(200.0, 200.0, 200.0, 200.0), Rect::new(0.0, 0.0, 200.0, 200.0));
    }

    #[test]
    fn same_ratio_source_smaller() {
        assert_eq!(crop(160.0, 120.0, 320.0, 240.0), Rect::new(0.0, 0.0, 160.0, 120.0));
    }

    #[test]
    fn same_ratio_source_larger() {
        assert_eq!(crop(200.0, 800.0, 100.0, 400.0), Rect::new(0.0, 0.0, 200.0, 800.0));
    }

    #[test]
    fn same_ratio_despite_float_noise() {
        // 640x360 against a 16:9 box whose width carries float noise from
        // the layout math. The rounded ratios match, so no crop happens.
        let c = crop(640.0, 360.0, 1155.5555555555557, 650.0);
        assert_eq!(c, Rect::new(0.0, 0.0, 640.0, 360.0));
    }

    // ── source relatively wider ─────────────────────────────────────────

    #[test]
    fn wider_source_small() {
        assert_eq!(crop(400.0, 200.0, 600.0, 600.0), Rect::new(100.0, 0.0, 200.0, 200.0));
    }

    #[test]
    fn wider_source_extreme() {
        let c = crop(320.0, 100.0, 640.0, 480.0);
        assert!((c.x - 93.33333333333334).abs() < 1e-9);
        assert_eq!(c.y, 0.0);
        assert!((c.width - 133.33333333333331).abs() < 1e-9);
        assert_eq!(c.height, 100.0);
    }

    #[test]
    fn wider_source_larger_than_destination() {
        assert_eq!(
            crop(1400.0, 1200.0, 600.0, 600.0),
            Rect::new(100.0, 0.0, 1200.0, 1200.0)
        );
    }

    #[test]
    fn wider_source_into_portrait_destination() {
        assert_eq!(crop(900.0, 300.0, 240.0, 320.0), Rect::new(337.5, 0.0, 225.0, 300.0));
    }

    // ── source relatively narrower ──────────────────────────────────────

    #[test]
    fn narrower_source_centers_vertically() {
        assert_eq!(crop(200.0, 400.0, 600.0, 600.0), Rect::new(0.0, 100.0, 200.0, 200.0));
    }

    #[test]
    fn narrower_source_into_landscape_destination() {
        // 1:2 source into 2:1 destination: keep width 100, crop to 50 tall.
        let c = crop(100.0, 200.0, 800.0, 400.0);
        assert_eq!(c, Rect::new(0.0, 75.0, 100.0, 50.0));
    }

    // ── contract ────────────────────────────────────────────────────────

    #[test]
    fn crop_ratio_matches_destination() {
        for (sw, sh, dw, dh) in [
            (1920.0, 1080.0, 320.0, 480.0),
            (640.0, 480.0, 1280.0, 720.0),
            (100.0, 1000.0, 640.0, 480.0),
        ] {
            let c = crop(sw, sh, dw, dh);
            let crop_key = (c.width / c.height * 1000.0_f64).round();
            let dest_key = (dw / dh * 1000.0_f64).round();
            assert_eq!(crop_key, dest_key, "{sw}x{sh} into {dw}x{dh}");
            assert!(c.x >= 0.0 && c.y >= 0.0);
            assert!(c.x + c.width <= sw && c.y + c.height <= sh);
        }
    }

    #[test]
    fn non_positive_heights_are_rejected() {
        assert_eq!(
            cover_crop(Size::new(640.0, 0.0), Size::new(320.0, 240.0)),
            Err(LayoutError::InvalidCropHeight {
                source: 0.0,
                destination: 240.0
            })
        );
        assert!(matches!(
            cover_crop(Size::new(640.0, 480.0), Size::new(320.0, -2.0)),
            Err(LayoutError::InvalidCropHeight { .. })
        ));
    }
}

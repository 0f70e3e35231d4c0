//! Tile descriptors, layout options, and the big/small region composition.
//!
//! [`compute_layout`] is the primary entry point: it partitions tiles into
//! big (screen-share class) and small subsets, reserves a proportional
//! sub-container for the big subset, lays out each region with the grid
//! engine, and reassembles the boxes in original input order.
//!
//! # Example
//!
//! ```
//! use tilegrid::{LayoutOptions, Tile, compute_layout};
//!
//! let opts = LayoutOptions::new(640.0, 480.0);
//! let tiles = [Tile::new(1280.0, 720.0), Tile::new(640.0, 480.0)];
//! let boxes = compute_layout(&opts, &tiles).unwrap();
//!
//! // One box per tile, side by side across the canvas.
//! assert_eq!(boxes.len(), 2);
//! assert_eq!(boxes[0].width, 320.0);
//! assert_eq!(boxes[1].x, 320.0);
//! ```

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use serde::{Deserialize, Serialize};

use crate::grid::{Region, layout_rows};

/// One video source's native resolution and its big/small classification.
///
/// Created per layout call from current frame dimensions; never persisted.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Native width in pixels.
    pub width: f64,
    /// Native height in pixels.
    pub height: f64,
    /// Whether this tile gets priority area allocation.
    #[serde(default)]
    pub big: bool,
}

impl Tile {
    /// An ordinary (small) tile.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            big: false,
        }
    }

    /// A big tile (e.g. a screen share).
    pub const fn big(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            big: true,
        }
    }

    /// Native height/width ratio.
    ///
    /// Zero-area tiles produce 0 or a non-finite ratio, which propagates
    /// into the resulting boxes rather than failing the layout call.
    pub fn ratio(&self) -> f64 {
        self.height / self.width
    }
}

/// Width × height in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle. Used both for output layout boxes (canvas
/// space) and for crop rectangles (source space).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether every coordinate is finite.
    ///
    /// A tile with zero width or height pushes 0 or a non-finite ratio
    /// through the grid math. Renderers should check this and skip the
    /// frame instead of drawing — it means a stream has not produced its
    /// first decoded frame yet.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Height/width ratio.
    pub fn ratio(&self) -> f64 {
        self.height / self.width
    }
}

/// Where to place rows (and items within a row) that do not fill the
/// container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignItems {
    /// Anchor at the top/left edge.
    Start,
    /// Center within the leftover space.
    #[default]
    Center,
    /// Anchor at the bottom/right edge.
    End,
}

/// Layout configuration.
///
/// The recognized options and their defaults:
///
/// | option               | default  | meaning                                             |
/// |----------------------|----------|-----------------------------------------------------|
/// | `container_width`    | 640      | output canvas width                                 |
/// | `container_height`   | 480      | output canvas height                                |
/// | `fixed_ratio`        | false    | preserve each tile's native ratio                   |
/// | `min_ratio`          | 9/16     | widest height/width ratio when not fixed            |
/// | `max_ratio`          | 3/2      | narrowest height/width ratio when not fixed         |
/// | `align_items`        | center   | placement when there are no big tiles               |
/// | `big_percentage`     | 0.8      | container fraction reserved for the big region      |
/// | `big_first`          | true     | big region anchored at the origin                   |
/// | `big_fixed_ratio`    | false    | `fixed_ratio` for the big region                    |
/// | `big_min_ratio`      | 9/16     | `min_ratio` for the big region                      |
/// | `big_max_ratio`      | 3/2      | `max_ratio` for the big region                      |
/// | `big_align_items`    | center   | placement inside the big region                     |
/// | `small_align_items`  | center   | placement inside the small region beside a big one  |
///
/// Deserializing a partial option bag fills the remaining fields from these
/// defaults, so persisted user preferences only need to store what they
/// override:
///
/// ```
/// # use tilegrid::LayoutOptions;
/// let opts: LayoutOptions =
///     serde_json::from_str(r#"{ "containerWidth": 1280, "fixedRatio": true }"#).unwrap();
/// assert_eq!(opts.container_height, 480.0);
/// assert!(opts.fixed_ratio);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub container_width: f64,
    pub container_height: f64,
    pub fixed_ratio: bool,
    pub min_ratio: f64,
    pub max_ratio: f64,
    pub align_items: AlignItems,
    pub big_percentage: f64,
    pub big_first: bool,
    pub big_fixed_ratio: bool,
    pub big_min_ratio: f64,
    pub big_max_ratio: f64,
    pub big_align_items: AlignItems,
    pub small_align_items: AlignItems,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            container_width: 640.0,
            container_height: 480.0,
            fixed_ratio: false,
            min_ratio: 9.0 / 16.0,
            max_ratio: 3.0 / 2.0,
            align_items: AlignItems::Center,
            big_percentage: 0.8,
            big_first: true,
            big_fixed_ratio: false,
            big_min_ratio: 9.0 / 16.0,
            big_max_ratio: 3.0 / 2.0,
            big_align_items: AlignItems::Center,
            small_align_items: AlignItems::Center,
        }
    }
}

impl LayoutOptions {
    /// Options for the given container size, everything else defaulted.
    pub fn new(container_width: f64, container_height: f64) -> Self {
        Self {
            container_width,
            container_height,
            ..Self::default()
        }
    }

    /// Preserve each tile's native aspect ratio instead of a shared target
    /// ratio. `min_ratio`/`max_ratio` are ignored when set.
    pub fn fixed_ratio(mut self, fixed: bool) -> Self {
        self.fixed_ratio = fixed;
        self
    }

    /// Bounds on the shared height/width ratio when not fixed.
    pub fn ratio_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_ratio = min;
        self.max_ratio = max;
        self
    }

    /// Placement of rows that don't fill the container (no big tiles).
    pub fn align_items(mut self, align: AlignItems) -> Self {
        self.align_items = align;
        self
    }

    /// Fraction of the container reserved for the big region.
    pub fn big_percentage(mut self, fraction: f64) -> Self {
        self.big_percentage = fraction;
        self
    }

    /// Whether the big region is anchored at the origin (small region takes
    /// the remainder) or vice versa.
    pub fn big_first(mut self, first: bool) -> Self {
        self.big_first = first;
        self
    }

    /// `fixed_ratio` for the big region.
    pub fn big_fixed_ratio(mut self, fixed: bool) -> Self {
        self.big_fixed_ratio = fixed;
        self
    }

    /// Ratio bounds for the big region.
    pub fn big_ratio_bounds(mut self, min: f64, max: f64) -> Self {
        self.big_min_ratio = min;
        self.big_max_ratio = max;
        self
    }

    /// Placement inside the big region.
    pub fn big_align_items(mut self, align: AlignItems) -> Self {
        self.big_align_items = align;
        self
    }

    /// Placement inside the small region when a big region exists.
    pub fn small_align_items(mut self, align: AlignItems) -> Self {
        self.small_align_items = align;
        self
    }
}

/// Layout or crop computation error.
///
/// Every variant is a caller contract violation, not a transient failure:
/// the current call should be aborted, not retried.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LayoutError {
    /// Container width or height is zero or negative.
    InvalidContainer { width: f64, height: f64 },
    /// Crop source or destination height is zero or negative.
    InvalidCropHeight { source: f64, destination: f64 },
    /// A region produced a box count that does not match its subset size.
    /// Indicates an internal invariant violation.
    ArityMismatch { expected: usize, found: usize },
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidContainer { width, height } => {
                write!(f, "container dimensions must be positive, got {width}x{height}")
            }
            Self::InvalidCropHeight {
                source,
                destination,
            } => write!(
                f,
                "crop heights must be positive, got source {source}, destination {destination}"
            ),
            Self::ArityMismatch { expected, found } => {
                write!(f, "region produced {found} boxes, expected {expected}")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

/// Compute one layout box per tile, in input order.
///
/// Tiles flagged big share a sub-container covering `big_percentage` of the
/// container (full width below/above the small region, or full height
/// beside it, depending on which way the container is longer relative to
/// the first big tile). Each region is laid out independently and the boxes
/// are reassembled by the tiles' original indices, so renderers can rely on
/// positional correspondence with their own per-tile metadata.
///
/// Fails fast on a non-positive container dimension. Degenerate tiles
/// (zero width or height) do not fail: they produce non-finite boxes that
/// callers detect with [`Rect::is_finite`].
pub fn compute_layout(opts: &LayoutOptions, tiles: &[Tile]) -> Result<Vec<Rect>, LayoutError> {
    let cw = opts.container_width;
    let ch = opts.container_height;
    if cw <= 0.0 || ch <= 0.0 {
        return Err(LayoutError::InvalidContainer {
            width: cw,
            height: ch,
        });
    }

    let available_ratio = ch / cw;

    let mut big_indices: Vec<usize> = Vec::new();
    let mut big_ratios: Vec<f64> = Vec::new();
    let mut small_ratios: Vec<f64> = Vec::new();
    for (idx, tile) in tiles.iter().enumerate() {
        if tile.big {
            big_indices.push(idx);
            big_ratios.push(tile.ratio());
        } else {
            small_ratios.push(tile.ratio());
        }
    }

    let (big_boxes, small_boxes) = if !big_ratios.is_empty() && !small_ratios.is_empty() {
        // Reserve the big region along whichever axis leaves the container
        // relatively longer than the first big tile.
        let (big_width, big_height, offset_left, offset_top, rear_left, rear_top);
        if available_ratio > big_ratios[0] {
            // Container is tall relative to the big tile: big region takes
            // the full width, small tiles go below (or above).
            big_width = cw;
            big_height = (ch * opts.big_percentage).floor();
            offset_left = 0.0;
            offset_top = big_height;
            rear_left = 0.0;
            rear_top = ch - big_height;
        } else {
            // Container is wide: big region takes the full height, small
            // tiles go beside it.
            big_height = ch;
            big_width = (cw * opts.big_percentage).floor();
            offset_left = big_width;
            offset_top = 0.0;
            rear_left = cw - big_width;
            rear_top = 0.0;
        }
        let (big_offset_left, big_offset_top) = if opts.big_first {
            (0.0, 0.0)
        } else {
            (rear_left, rear_top)
        };
        let (small_offset_left, small_offset_top) = if opts.big_first {
            (offset_left, offset_top)
        } else {
            (0.0, 0.0)
        };

        let big_region = Region {
            width: big_width,
            height: big_height,
            offset_left: big_offset_left,
            offset_top: big_offset_top,
            fixed_ratio: opts.big_fixed_ratio,
            min_ratio: opts.big_min_ratio,
            max_ratio: opts.big_max_ratio,
            align_items: opts.big_align_items,
        };
        let small_region = Region {
            width: cw - offset_left,
            height: ch - offset_top,
            offset_left: small_offset_left,
            offset_top: small_offset_top,
            fixed_ratio: opts.fixed_ratio,
            min_ratio: opts.min_ratio,
            max_ratio: opts.max_ratio,
            align_items: opts.small_align_items,
        };
        (
            layout_rows(&big_region, &big_ratios),
            layout_rows(&small_region, &small_ratios),
        )
    } else if !big_ratios.is_empty() {
        // Only big tiles: lay them out in the full container with the big
        // ratio policy.
        let region = Region {
            width: cw,
            height: ch,
            offset_left: 0.0,
            offset_top: 0.0,
            fixed_ratio: opts.big_fixed_ratio,
            min_ratio: opts.big_min_ratio,
            max_ratio: opts.big_max_ratio,
            align_items: opts.big_align_items,
        };
        (layout_rows(&region, &big_ratios), Vec::new())
    } else {
        let region = Region {
            width: cw,
            height: ch,
            offset_left: 0.0,
            offset_top: 0.0,
            fixed_ratio: opts.fixed_ratio,
            min_ratio: opts.min_ratio,
            max_ratio: opts.max_ratio,
            align_items: opts.align_items,
        };
        (Vec::new(), layout_rows(&region, &small_ratios))
    };

    interleave(tiles.len(), &big_indices, big_boxes, small_boxes)
}

/// Rebuild the caller's ordering: walk original indices, draining the big
/// region's boxes at recorded big indices and the small region's boxes
/// everywhere else.
fn interleave(
    count: usize,
    big_indices: &[usize],
    big_boxes: Vec<Rect>,
    small_boxes: Vec<Rect>,
) -> Result<Vec<Rect>, LayoutError> {
    if big_boxes.len() != big_indices.len() {
        return Err(LayoutError::ArityMismatch {
            expected: big_indices.len(),
            found: big_boxes.len(),
        });
    }
    let small_count = count - big_indices.len();
    if small_boxes.len() != small_count {
        return Err(LayoutError::ArityMismatch {
            expected: small_count,
            found: small_boxes.len(),
        });
    }

    let mut big_iter = big_boxes.into_iter();
    let mut small_iter = small_boxes.into_iter();
    let mut boxes = Vec::with_capacity(count);
    for idx in 0..count {
        let next = if big_indices.contains(&idx) {
            big_iter.next()
        } else {
            small_iter.next()
        };
        match next {
            Some(b) => boxes.push(b),
            // Lengths were verified above; running dry here means the
            // recorded indices are inconsistent.
            None => {
                return Err(LayoutError::ArityMismatch {
                    expected: count,
                    found: idx,
                });
            }
        }
    }
    Ok(boxes)
}

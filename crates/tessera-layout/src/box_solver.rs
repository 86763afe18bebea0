//! Linear box solver (hbox / vbox).
//!
//! Given an ordered list of [`BoxRequest`]s and the container's available
//! size, computes every box's main and cross size and its position. The
//! solver is a pure function: identical inputs give identical outputs.
//!
//! # Algorithm
//!
//! 1. Classify boxes. Flexed boxes (flex > 0, no configured main size) add
//!    their weight to the total flex; the rest take their configured or
//!    natural size, clamped to their bounds.
//! 2. Compare the desired and minimum main lengths with the inner length.
//! 3. Too narrow: every box takes its own minimum.
//! 4. Tight: flexed boxes take their minimum; fixed boxes absorb the
//!    shortfall, least slack first, never below their minimum.
//! 5. Room to spare: leftover space is shared among flexed boxes by weight.
//! 6. Cross sizes follow the alignment.
//! 7. Main positions accumulate from the packing offset.

use serde::Serialize;
use tessera_component::{Align, Pack};

use crate::box_model::{constrain, BoxRequest, BoxResult, Orientation, Sides, Size};

/// Container-level inputs to [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoxParams {
    /// Main axis.
    pub orientation: Orientation,
    /// The container's target size, padding included.
    pub available: Size,
    /// Main-axis packing.
    #[serde(skip)]
    pub pack: Pack,
    /// Cross-axis alignment.
    #[serde(skip)]
    pub align: Align,
    /// Padding inside the container.
    pub padding: Sides,
}

impl BoxParams {
    /// Main length available to the boxes, padding excluded.
    #[must_use]
    pub fn inner_main(&self) -> i32 {
        let o = self.orientation;
        (o.main(self.available) - o.main_sides(self.padding)).max(0)
    }

    /// Cross length available to the boxes, padding excluded.
    #[must_use]
    pub fn inner_cross(&self) -> i32 {
        let o = self.orientation;
        (o.cross(self.available) - o.cross_sides(self.padding)).max(0)
    }
}

/// Aggregate facts about a solved run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoxMeta {
    /// Largest cross size including margins.
    pub max_cross: i32,
    /// Main length of the non-flexed boxes, margins included.
    pub non_flex_main: i32,
    /// Main length wanted: fixed sizes plus flexed minimums, margins included.
    pub desired_main: i32,
    /// Main length the boxes cannot go below, margins included.
    pub minimum_main: i32,
    /// `desired_main - inner main length`; positive when tight.
    pub shortfall: i32,
    /// The minimum main length exceeds the inner main length.
    pub too_narrow: bool,
}

/// Output of [`solve`]: one result per request, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoxSolution {
    /// Per-box geometry.
    pub results: Vec<BoxResult>,
    /// Run metadata.
    pub meta: BoxMeta,
}

impl BoxSolution {
    /// Main length used by the results, margins included.
    #[must_use]
    pub fn used_main(&self, boxes: &[BoxRequest], orientation: Orientation) -> i32 {
        self.results
            .iter()
            .zip(boxes)
            .map(|(result, request)| {
                orientation.main(Size::new(result.width, result.height))
                    + orientation.main_sides(request.margins)
            })
            .sum()
    }
}

/// Solve a linear box layout.
#[must_use]
pub fn solve(boxes: &[BoxRequest], params: &BoxParams) -> BoxSolution {
    if boxes.is_empty() {
        return BoxSolution::default();
    }

    let o = params.orientation;
    let inner_main = params.inner_main();
    let inner_cross = params.inner_cross();

    // STEP 1: classify and measure.
    let mut meta = BoxMeta::default();
    let mut total_flex = 0.0_f64;
    let mut flex_margins = 0;
    let mut mains = Vec::with_capacity(boxes.len());
    for request in boxes {
        let margin_main = o.main_sides(request.margins);
        if request.is_flexed(o) {
            total_flex += request.flex;
            flex_margins += margin_main;
            mains.push(0);
        } else {
            let size = request.resolved_main(o);
            meta.non_flex_main += margin_main + size;
            mains.push(size);
        }
        meta.desired_main += margin_main + desired_main(request, o);
        meta.minimum_main += request.minimum_outer_main(o);
        meta.max_cross = meta
            .max_cross
            .max(request.resolved_cross(o) + o.cross_sides(request.margins));
    }

    // STEP 2: compare against the inner length.
    meta.shortfall = meta.desired_main - inner_main;
    meta.too_narrow = meta.minimum_main > inner_main;

    if meta.too_narrow {
        // STEP 3: every box at its own minimum.
        for (main, request) in mains.iter_mut().zip(boxes) {
            let (min, _) = request.main_bounds(o);
            *main = min.unwrap_or_else(|| request.resolved_main(o));
        }
    } else if meta.shortfall > 0 {
        // STEP 4: shrink toward minimums.
        distribute_shortfall(boxes, &mut mains, o, meta.shortfall);
    } else {
        // STEP 5: share leftover space among flexed boxes.
        // Flexed boxes' margins come out of the pool before it is shared.
        let leftover = (inner_main - meta.non_flex_main - flex_margins).max(0);
        distribute_flex(boxes, &mut mains, o, leftover, total_flex);
    }

    // STEP 7 (needs final main sizes): packing offset.
    let used: i32 = mains
        .iter()
        .zip(boxes)
        .map(|(main, request)| main + o.main_sides(request.margins))
        .sum();
    let free = (inner_main - used).max(0);
    let mut offset = o.main_start(params.padding)
        + match params.pack {
            Pack::Start => 0,
            Pack::Center => free / 2,
            Pack::End => free,
        };

    let cross_origin = o.cross_start(params.padding);
    let mut results = Vec::with_capacity(boxes.len());
    for (&main, request) in mains.iter().zip(boxes) {
        // STEP 6: cross size and position.
        let margin_cross = o.cross_sides(request.margins);
        let (min_cross, max_cross) = request.cross_bounds(o);
        let natural_cross = request.resolved_cross(o);
        let mut cross_pos = cross_origin + o.cross_start(request.margins);
        let cross = match params.align {
            Align::Stretch => {
                constrain(inner_cross - margin_cross, Some(min_cross.unwrap_or(0)), max_cross)
            }
            Align::StretchMax => constrain(
                meta.max_cross - margin_cross,
                Some(min_cross.unwrap_or(0)),
                max_cross,
            ),
            Align::Middle => {
                let diff = inner_cross - natural_cross - margin_cross;
                if diff > 0 {
                    cross_pos += diff / 2;
                }
                natural_cross
            }
            Align::Start => natural_cross,
        };

        // STEP 7: main position.
        offset += o.main_start(request.margins);
        let main_pos = offset;
        offset += main + o.main_end(request.margins);

        let size = o.size(main, cross);
        let (left, top) = match o {
            Orientation::Horizontal => (main_pos, cross_pos),
            Orientation::Vertical => (cross_pos, main_pos),
        };
        results.push(BoxResult {
            left,
            top,
            width: size.width,
            height: size.height,
        });
    }

    log::trace!(
        "box solve {o:?}: inner={inner_main}x{inner_cross} desired={} minimum={} non_flex={} too_narrow={}",
        meta.desired_main,
        meta.minimum_main,
        meta.non_flex_main,
        meta.too_narrow
    );

    BoxSolution { results, meta }
}

/// Main length a box wants before distribution.
fn desired_main(request: &BoxRequest, o: Orientation) -> i32 {
    if request.is_flexed(o) {
        request.main_bounds(o).0.unwrap_or(0)
    } else {
        request.resolved_main(o)
    }
}

/// Tight case: flexed boxes drop to their minimum, fixed boxes shrink.
///
/// Fixed boxes are visited in ascending order of slack (stable, so source
/// order breaks ties). Each takes `ceil(remaining / boxes_left)` of the
/// shortfall, limited by its own slack; boxes visited later make up for what
/// earlier ones could not absorb.
fn distribute_shortfall(boxes: &[BoxRequest], mains: &mut [i32], o: Orientation, shortfall: i32) {
    let mut shrinkable = Vec::new();
    for (index, request) in boxes.iter().enumerate() {
        let floor = request.floor_main(o);
        if request.is_flexed(o) {
            mains[index] = floor;
        } else {
            shrinkable.push((index, mains[index] - floor, floor));
        }
    }
    shrinkable.sort_by_key(|&(_, slack, _)| slack);

    let mut remaining = shortfall;
    let count = shrinkable.len();
    for (visited, &(index, _, floor)) in shrinkable.iter().enumerate() {
        if remaining <= 0 {
            break;
        }
        let share = ceil_div(remaining, (count - visited) as i32);
        let old = mains[index];
        let new = (old - share).max(floor);
        mains[index] = new;
        remaining -= old - new;
    }
}

/// Room to spare: each flexed box gets `floor(space * flex / total_flex)`.
///
/// A share outside the box's bounds is clamped to the bound. The sum of the
/// clamping adjustments decides what freezes in a round: positive freezes
/// only the boxes raised to their minimum, negative only those lowered to
/// their maximum, zero freezes every violator. The rest of the space is
/// re-shared among the unfrozen boxes, so bounds are honoured and the shares
/// never sum past `space`.
fn distribute_flex(
    boxes: &[BoxRequest],
    mains: &mut [i32],
    o: Orientation,
    space: i32,
    total_flex: f64,
) {
    if total_flex <= 0.0 {
        return;
    }

    let mut unfrozen: Vec<usize> = (0..boxes.len()).filter(|&i| boxes[i].is_flexed(o)).collect();
    let mut pool = space;
    let mut pool_flex = total_flex;

    while !unfrozen.is_empty() {
        let shares: Vec<i32> = unfrozen
            .iter()
            .map(|&i| flex_share(pool, boxes[i].flex, pool_flex))
            .collect();

        let mut violators = Vec::new();
        let mut total_violation = 0;
        for (&index, &share) in unfrozen.iter().zip(&shares) {
            let (min, max) = boxes[index].main_bounds(o);
            let bounded = constrain(share, min, max);
            if bounded != share {
                total_violation += bounded - share;
                violators.push((index, bounded, bounded > share));
            }
        }

        if violators.is_empty() {
            for (&index, &share) in unfrozen.iter().zip(&shares) {
                mains[index] = share;
            }
            return;
        }

        let freezing = violators.into_iter().filter(|&(_, _, raised)| {
            match total_violation.signum() {
                1 => raised,
                -1 => !raised,
                _ => true,
            }
        });
        for (index, bounded, _) in freezing {
            mains[index] = bounded;
            pool -= bounded;
            pool_flex -= boxes[index].flex;
            unfrozen.retain(|&i| i != index);
        }
        pool = pool.max(0);
    }
}

/// `floor(space * flex / total_flex)`, never negative.
#[must_use]
pub fn flex_share(space: i32, flex: f64, total_flex: f64) -> i32 {
    if total_flex <= 0.0 || space <= 0 {
        return 0;
    }
    (f64::from(space) * flex / total_flex).floor() as i32
}

const fn ceil_div(value: i32, divisor: i32) -> i32 {
    (value + divisor - 1) / divisor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hbox(width: i32, height: i32) -> BoxParams {
        BoxParams {
            orientation: Orientation::Horizontal,
            available: Size::new(width, height),
            ..BoxParams::default()
        }
    }

    fn widths(solution: &BoxSolution) -> Vec<i32> {
        solution.results.iter().map(|r| r.width).collect()
    }

    #[test]
    fn test_zero_boxes() {
        let solution = solve(&[], &hbox(100, 20));
        assert!(solution.results.is_empty());
        assert_eq!(solution.meta, BoxMeta::default());
    }

    #[test]
    fn test_flex_shares_leftover() {
        let boxes = [
            BoxRequest::fixed(100, 20),
            BoxRequest::natural(Size::new(0, 20)).with_flex(1.0),
            BoxRequest::natural(Size::new(0, 20)).with_flex(3.0),
        ];
        let solution = solve(&boxes, &hbox(500, 20));
        assert_eq!(widths(&solution), vec![100, 100, 300]);
        assert_eq!(
            solution.results.iter().map(|r| r.left).collect::<Vec<_>>(),
            vec![0, 100, 200]
        );
        assert!(!solution.meta.too_narrow);
    }

    #[test]
    fn test_flex_rounding_never_over_allocates() {
        let boxes = vec![BoxRequest::natural(Size::default()).with_flex(1.0); 3];
        let solution = solve(&boxes, &hbox(100, 10));
        assert_eq!(widths(&solution), vec![33, 33, 33]);
    }

    #[test]
    fn test_flex_respects_min_width() {
        let boxes = [
            BoxRequest::natural(Size::default())
                .with_flex(1.0)
                .with_width_bounds(Some(100), None),
            BoxRequest::natural(Size::default()).with_flex(1.0),
        ];
        let solution = solve(&boxes, &hbox(150, 10));
        assert_eq!(widths(&solution), vec![100, 50]);
    }

    #[test]
    fn test_flex_respects_max_width() {
        let boxes = [
            BoxRequest::natural(Size::default())
                .with_flex(1.0)
                .with_width_bounds(None, Some(20)),
            BoxRequest::natural(Size::default()).with_flex(1.0),
        ];
        let solution = solve(&boxes, &hbox(200, 10));
        assert_eq!(widths(&solution), vec![20, 180]);
    }

    #[test]
    fn test_flex_leaves_room_for_margins() {
        let boxes = [BoxRequest::natural(Size::default())
            .with_flex(1.0)
            .with_margins(Sides::new(0, 5, 0, 5))];
        let solution = solve(&boxes, &hbox(100, 10));
        let only = solution.results[0];
        assert_eq!((only.left, only.width), (5, 90));
        assert_eq!(only.left + only.width + 5, 100);
    }

    #[test]
    fn test_flex_min_violation_freezes_before_max() {
        let boxes = [
            BoxRequest::natural(Size::default())
                .with_flex(1.0)
                .with_width_bounds(Some(100), None),
            BoxRequest::natural(Size::default())
                .with_flex(1.0)
                .with_width_bounds(None, Some(20)),
        ];
        let solution = solve(&boxes, &hbox(110, 10));
        assert!(!solution.meta.too_narrow);
        assert_eq!(widths(&solution), vec![100, 10]);
    }

    #[test]
    fn test_flex_max_violation_freezes_before_min() {
        let boxes = [
            BoxRequest::natural(Size::default())
                .with_flex(1.0)
                .with_width_bounds(Some(60), None),
            BoxRequest::natural(Size::default())
                .with_flex(1.0)
                .with_width_bounds(None, Some(20)),
        ];
        // Shares of 100 each: only the capped box freezes, the other takes the rest.
        let solution = solve(&boxes, &hbox(200, 10));
        assert_eq!(widths(&solution), vec![180, 20]);
    }

    #[test]
    fn test_shortfall_shrinks_least_slack_first() {
        let boxes = [
            BoxRequest::fixed(100, 10).with_width_bounds(Some(90), None),
            BoxRequest::fixed(100, 10).with_width_bounds(Some(20), None),
            BoxRequest::natural(Size::default())
                .with_flex(1.0)
                .with_width_bounds(Some(10), None),
        ];
        // desired 210, minimum 120, available 150 -> shortfall 60.
        let solution = solve(&boxes, &hbox(150, 10));
        assert!(!solution.meta.too_narrow);
        assert_eq!(solution.meta.shortfall, 60);
        assert_eq!(widths(&solution), vec![90, 50, 10]);
    }

    #[test]
    fn test_shortfall_ties_keep_source_order() {
        let boxes = [
            BoxRequest::fixed(50, 10).with_width_bounds(Some(0), None),
            BoxRequest::fixed(50, 10).with_width_bounds(Some(0), None),
        ];
        // shortfall 5: first box takes ceil(5/2) = 3, second the remaining 2.
        let solution = solve(&boxes, &hbox(95, 10));
        assert_eq!(widths(&solution), vec![47, 48]);
    }

    #[test]
    fn test_too_narrow_clamps_to_minimums() {
        let boxes = [
            BoxRequest::fixed(100, 10).with_width_bounds(Some(80), None),
            BoxRequest::fixed(100, 10),
        ];
        let solution = solve(&boxes, &hbox(120, 10));
        assert!(solution.meta.too_narrow);
        assert_eq!(solution.meta.minimum_main, 180);
        assert_eq!(widths(&solution), vec![80, 100]);
    }

    #[test]
    fn test_pack_center_and_end() {
        let boxes = [BoxRequest::fixed(40, 10), BoxRequest::fixed(20, 10)];
        let mut params = hbox(100, 10);
        params.pack = Pack::Center;
        let centered = solve(&boxes, &params);
        assert_eq!(centered.results[0].left, 20);
        assert_eq!(centered.results[1].left, 60);

        params.pack = Pack::End;
        let end = solve(&boxes, &params);
        assert_eq!(end.results[0].left, 40);
        assert_eq!(end.results[1].left, 80);
    }

    #[test]
    fn test_margins_and_padding() {
        let boxes = [
            BoxRequest::fixed(30, 10).with_margins(Sides::new(1, 2, 3, 4)),
            BoxRequest::fixed(30, 10).with_margins(Sides::uniform(5)),
        ];
        let mut params = hbox(200, 50);
        params.padding = Sides::uniform(10);
        let solution = solve(&boxes, &params);
        assert_eq!(solution.results[0].rect().x, 14);
        assert_eq!(solution.results[0].rect().y, 11);
        assert_eq!(solution.results[1].left, 14 + 30 + 2 + 5);
        assert_eq!(solution.results[1].top, 15);
        assert_eq!(solution.meta.max_cross, 20);
    }

    #[test]
    fn test_align_stretch_clamps() {
        let boxes = [
            BoxRequest::fixed(10, 10).with_margins(Sides::new(5, 0, 5, 0)),
            BoxRequest::natural(Size::new(10, 10)).with_height_bounds(None, Some(30)),
        ];
        let mut params = hbox(100, 80);
        params.align = Align::Stretch;
        let solution = solve(&boxes, &params);
        assert_eq!(solution.results[0].height, 70);
        assert_eq!(solution.results[1].height, 30);
    }

    #[test]
    fn test_align_stretchmax() {
        let boxes = [
            BoxRequest::fixed(10, 40),
            BoxRequest::fixed(10, 10).with_margins(Sides::new(2, 0, 2, 0)),
        ];
        let mut params = hbox(100, 80);
        params.align = Align::StretchMax;
        let solution = solve(&boxes, &params);
        assert_eq!(solution.results[0].height, 40);
        assert_eq!(solution.results[1].height, 36);
    }

    #[test]
    fn test_align_middle_centers() {
        let boxes = [BoxRequest::fixed(10, 20)];
        let mut params = hbox(100, 61);
        params.align = Align::Middle;
        let solution = solve(&boxes, &params);
        assert_eq!(solution.results[0].top, 20);
        assert_eq!(solution.results[0].height, 20);
    }

    #[test]
    fn test_vertical_orientation() {
        let boxes = [
            BoxRequest::fixed(50, 40),
            BoxRequest::natural(Size::new(20, 0)).with_flex(1.0),
        ];
        let params = BoxParams {
            orientation: Orientation::Vertical,
            available: Size::new(100, 300),
            align: Align::Stretch,
            ..BoxParams::default()
        };
        let solution = solve(&boxes, &params);
        assert_eq!(solution.results[0].rect(), tessera_component::Rect::new(0, 0, 100, 40));
        assert_eq!(solution.results[1].rect(), tessera_component::Rect::new(0, 40, 100, 260));
    }

    #[test]
    fn test_ceil_div() {
        assert_eq!(ceil_div(5, 2), 3);
        assert_eq!(ceil_div(4, 2), 2);
        assert_eq!(ceil_div(1, 3), 1);
    }
}

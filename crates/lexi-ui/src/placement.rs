use lexi_dom::{Rect, Viewport};

/// Side of the target a surface ended up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Top,
    Bottom,
    Right,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub placement: Placement,
}

impl Position {
    pub fn rect(&self, (width, height): (f64, f64)) -> Rect {
        Rect::new(self.x, self.y, width, height)
    }
}

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Keep a `width` x `height` box at least `padding` away from every viewport edge
pub fn avoid_screen_edges(
    x: f64,
    y: f64,
    (width, height): (f64, f64),
    viewport: &Viewport,
    padding: f64,
) -> (f64, f64) {
    (
        clamp(x, padding, viewport.width - width - padding),
        clamp(y, padding, viewport.height - height - padding),
    )
}

/// Place a tooltip next to `target`, trying above, below, right and left in that order.
///
/// The chosen side only decides the anchor; the final box is always clamped
/// into the viewport minus `padding`.
pub fn tooltip_position(
    target: Rect,
    size: (f64, f64),
    viewport: &Viewport,
    padding: f64,
) -> Position {
    let (width, height) = size;
    let centered_x = target.center_x() - width / 2.0;
    let centered_y = target.center_y() - height / 2.0;

    let (x, y, placement) = if target.top() - height - padding > 0.0 {
        (centered_x, target.top() - height - padding, Placement::Top)
    } else if target.bottom() + height + padding < viewport.height {
        (centered_x, target.bottom() + padding, Placement::Bottom)
    } else if target.right() + width + padding < viewport.width {
        (target.right() + padding, centered_y, Placement::Right)
    } else {
        (target.left() - width - padding, centered_y, Placement::Left)
    };

    let (x, y) = avoid_screen_edges(x, y, size, viewport, padding);
    Position { x, y, placement }
}

/// Horizontally centred, a third of the way down the viewport
pub fn modal_position((width, height): (f64, f64), viewport: &Viewport) -> (f64, f64) {
    let x = (viewport.width - width) / 2.0;
    let y = (viewport.height - height) / 3.0;
    (x.max(0.0), y.max(0.0))
}

/// Viewport position of the selection toolbar for an anchor point.
///
/// Centred above the anchor; drops below it when there is no room on top,
/// and never past the bottom edge.
pub fn toolbar_position(
    anchor_x: f64,
    anchor_y: f64,
    (width, height): (f64, f64),
    viewport: &Viewport,
) -> (f64, f64) {
    const PADDING: f64 = 10.0;

    let mut left = anchor_x - width / 2.0;
    let mut top = anchor_y - height - PADDING;

    if left + width > viewport.width - PADDING {
        left = viewport.width - width - PADDING;
    }
    if left < PADDING {
        left = PADDING;
    }
    if top < PADDING {
        top = anchor_y + PADDING + 20.0;
    }

    (left, clamp(top, PADDING, viewport.height - height - PADDING))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOOLTIP: (f64, f64) = (250.0, 120.0);

    fn viewport() -> Viewport {
        Viewport::new(1024.0, 768.0)
    }

    #[test]
    fn prefers_above_the_target() {
        let target = Rect::new(400.0, 300.0, 60.0, 20.0);
        let pos = tooltip_position(target, TOOLTIP, &viewport(), 8.0);

        assert_eq!(pos.placement, Placement::Top);
        assert_eq!(pos.y, 300.0 - 120.0 - 8.0);
        assert_eq!(pos.x, 430.0 - 125.0);
    }

    #[test]
    fn falls_back_below_then_right_then_left() {
        let vp = viewport();

        let near_top = Rect::new(400.0, 40.0, 60.0, 20.0);
        assert_eq!(
            tooltip_position(near_top, TOOLTIP, &vp, 8.0).placement,
            Placement::Bottom
        );

        let tall_short_viewport = Viewport::new(1024.0, 150.0);
        let middle = Rect::new(100.0, 60.0, 60.0, 20.0);
        assert_eq!(
            tooltip_position(middle, TOOLTIP, &tall_short_viewport, 8.0).placement,
            Placement::Right
        );

        let right_edge = Rect::new(900.0, 60.0, 60.0, 20.0);
        let pos = tooltip_position(right_edge, TOOLTIP, &tall_short_viewport, 8.0);
        assert_eq!(pos.placement, Placement::Left);
        assert_eq!(pos.x, 900.0 - 250.0 - 8.0);
    }

    #[test]
    fn tooltip_always_fits_inside_padded_viewport() {
        let vp = viewport();
        let padding = 8.0;
        let inner = Rect::new(
            padding,
            padding,
            vp.width - 2.0 * padding,
            vp.height - 2.0 * padding,
        );

        let mut checked = 0;
        for x in (-400..1500).step_by(37) {
            for y in (-300..1200).step_by(41) {
                for (w, h) in [(0.0, 0.0), (60.0, 18.0), (900.0, 40.0), (40.0, 700.0)] {
                    let target = Rect::new(x as f64, y as f64, w, h);
                    let pos = tooltip_position(target, TOOLTIP, &vp, padding);
                    let placed = pos.rect(TOOLTIP);
                    assert!(
                        placed.within(&inner),
                        "{placed:?} escapes {inner:?} for target {target:?}"
                    );
                    checked += 1;
                }
            }
        }
        assert!(checked > 1000);
    }

    #[test]
    fn modal_stays_in_viewport_coordinates_when_scrolled() {
        let mut vp = viewport();
        vp.scroll_y = 2000.0;

        assert_eq!(modal_position((600.0, 400.0), &vp), (212.0, 368.0 / 3.0));
        assert_eq!(modal_position((600.0, 900.0), &vp), (212.0, 0.0));
        assert_eq!(modal_position((1200.0, 400.0), &vp).0, 0.0);
    }

    #[test]
    fn toolbar_moves_below_near_the_top() {
        let vp = viewport();

        assert_eq!(toolbar_position(500.0, 300.0, (300.0, 60.0), &vp), (350.0, 230.0));
        assert_eq!(toolbar_position(500.0, 40.0, (300.0, 60.0), &vp), (350.0, 70.0));
        assert_eq!(toolbar_position(5.0, 300.0, (300.0, 60.0), &vp).0, 10.0);
        assert_eq!(toolbar_position(1020.0, 300.0, (300.0, 60.0), &vp).0, 714.0);
    }

    #[test]
    fn toolbar_ignores_scroll_offsets() {
        let mut vp = viewport();
        vp.scroll_x = 40.0;
        vp.scroll_y = 300.0;

        assert_eq!(toolbar_position(500.0, 200.0, (300.0, 60.0), &vp), (350.0, 130.0));
    }

    #[test]
    fn toolbar_below_the_anchor_is_kept_on_screen() {
        let short = Viewport::new(1024.0, 70.0);

        let (_, top) = toolbar_position(500.0, 5.0, (300.0, 40.0), &short);
        assert_eq!(top, 70.0 - 40.0 - 10.0);
        assert!(top + 40.0 <= short.height);
    }

    #[test]
    fn edge_avoidance_clamps_both_axes() {
        let vp = viewport();
        assert_eq!(
            avoid_screen_edges(-50.0, 900.0, (100.0, 100.0), &vp, 16.0),
            (16.0, 768.0 - 116.0)
        );
    }
}

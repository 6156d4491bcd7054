//! Pixel layout helpers shared by text elements and the scroll menu.
//!
//! Everything here is integer pixel math; division truncates toward zero.

use glam::IVec2;

use crate::components::TextAlignment;

/// Shift that moves a text primitive's top-left anchor so the text sits at
/// its nominal position with the requested alignment.
///
/// Center alignment centers the text on the position; Left puts the left edge
/// there; Right puts the right edge there.
pub fn alignment_offset(text_size: IVec2, alignment: TextAlignment) -> IVec2 {
    let mut offset = IVec2::new(-(text_size.x / 2), text_size.y / 2);

    match alignment {
        TextAlignment::Right => offset.x -= text_size.x / 2,
        TextAlignment::Left => offset.x += text_size.x / 2,
        TextAlignment::Center => {}
    }

    offset
}

/// Multiply a layout constant by the element scale, truncating to whole pixels.
pub fn scaled_px(value: f64, scale: f64) -> i32 {
    (value * scale) as i32
}

/// Scale a pair of layout constants, truncating to whole pixels.
pub fn scaled_px2(value: (f64, f64), scale: f64) -> IVec2 {
    IVec2::new(scaled_px(value.0, scale), scaled_px(value.1, scale))
}

/// Bounding size of a list body.
///
/// Height is the sum of the line heights. Width is the widest of the lines,
/// the header, and the two footer texts side by side plus horizontal padding.
pub fn list_size(
    lines: impl IntoIterator<Item = IVec2>,
    header: IVec2,
    footer_left: IVec2,
    footer_right: IVec2,
    padding: IVec2,
) -> IVec2 {
    let mut size = IVec2::ZERO;

    for line in lines {
        size.y += line.y;
        size.x = size.x.max(line.x);
    }

    size.x = size
        .x
        .max(header.x)
        .max(footer_left.x + footer_right.x + padding.x);
    size
}

/// Stacks lines downward from a top edge with no gaps.
///
/// Each placed line takes the current edge as its vertical offset, then the
/// edge moves down by that line's height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStack {
    edge: i32,
}

impl LineStack {
    /// Start stacking at `top`.
    pub fn new(top: i32) -> Self {
        Self { edge: top }
    }

    /// Place a line of `height` pixels and return its vertical offset.
    pub fn place(&mut self, height: i32) -> i32 {
        let offset = self.edge;
        self.edge -= height;
        offset
    }

    /// Current edge: the offset the next line would get.
    pub fn edge(&self) -> i32 {
        self.edge
    }
}

/// Clamp a selection index into `[0, len - 1]`, or 0 for an empty list.
pub fn clamp_selection(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_offsets_for_each_mode() {
        let size = IVec2::new(40, 20);
        assert_eq!(alignment_offset(size, TextAlignment::Right), IVec2::new(-40, 10));
        assert_eq!(alignment_offset(size, TextAlignment::Left), IVec2::new(0, 10));
        assert_eq!(alignment_offset(size, TextAlignment::Center), IVec2::new(-20, 10));
    }

    #[test]
    fn odd_widths_truncate() {
        let size = IVec2::new(41, 21);
        assert_eq!(alignment_offset(size, TextAlignment::Center), IVec2::new(-20, 10));
        assert_eq!(alignment_offset(size, TextAlignment::Right), IVec2::new(-40, 10));
    }

    #[test]
    fn lines_stack_without_gaps() {
        let heights = [20, 20, 24];
        let total: i32 = heights.iter().sum();
        assert_eq!(total, 64);

        let mut stack = LineStack::new(total / 2);
        let offsets: Vec<i32> = heights.iter().map(|&h| stack.place(h)).collect();
        assert_eq!(offsets, vec![32, 12, -8]);
        assert_eq!(stack.edge(), -32);
    }

    #[test]
    fn list_width_considers_header_and_footer() {
        let lines = [IVec2::new(100, 20), IVec2::new(140, 20)];
        let padding = IVec2::new(72, 32);

        let size = list_size(lines, IVec2::new(90, 22), IVec2::new(30, 18), IVec2::new(30, 18), padding);
        assert_eq!(size, IVec2::new(140, 40));

        let size = list_size(lines, IVec2::new(200, 22), IVec2::ZERO, IVec2::ZERO, padding);
        assert_eq!(size.x, 200);

        let size = list_size(lines, IVec2::ZERO, IVec2::new(60, 18), IVec2::new(50, 18), padding);
        assert_eq!(size.x, 182);
    }

    #[test]
    fn empty_list_is_footer_wide() {
        let size = list_size(std::iter::empty(), IVec2::ZERO, IVec2::ZERO, IVec2::ZERO, IVec2::new(72, 32));
        assert_eq!(size, IVec2::new(72, 0));
    }

    #[test]
    fn selection_saturates() {
        assert_eq!(clamp_selection(10, 5), 4);
        assert_eq!(clamp_selection(3, 5), 3);
        assert_eq!(clamp_selection(7, 0), 0);
    }

    #[test]
    fn pixel_constants_scale_and_truncate() {
        assert_eq!(scaled_px(72.0, 1.0), 72);
        assert_eq!(scaled_px(22.0, 0.75), 16);
        assert_eq!(scaled_px2((72.0, 32.0), 1.25), IVec2::new(90, 40));
    }
}

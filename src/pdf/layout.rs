//! Stateless page geometry: Letter-size constants, the two-column stat grid,
//! section-box sizing and the fixed palette.
//!
//! All coordinates are PDF user space: origin at the bottom-left of the page,
//! y increasing upward.

/// US Letter, in points.
pub(crate) const PAGE_WIDTH: f32 = 612.0;
pub(crate) const PAGE_HEIGHT: f32 = 792.0;

/// Left/right text margin used by the cover and profile pages.
pub(crate) const MARGIN_X: f32 = 56.0;
/// Margin around embedded attachment images.
pub(crate) const IMAGE_MARGIN: f32 = 50.0;
/// Height of the cover's gradient header band.
pub(crate) const HEADER_BAND_HEIGHT: f32 = 150.0;
/// Height of the label band stamped on every attachment page.
pub(crate) const ATTACHMENT_BAND_HEIGHT: f32 = 40.0;
/// Baseline of the running footer.
pub(crate) const FOOTER_Y: f32 = 30.0;
/// Lowest y a profile section may reach before overflowing to a new page.
pub(crate) const PROFILE_BOTTOM_LIMIT: f32 = 70.0;
/// x position where wrapped field values start on profile pages.
pub(crate) const FIELD_VALUE_X: f32 = 220.0;
/// Character budget for wrapped field values.
pub(crate) const FIELD_WRAP_CHARS: usize = 50;
/// Character budget for stat-cell values before ellipsis truncation.
pub(crate) const STAT_VALUE_MAX_CHARS: usize = 28;

pub(crate) const STAT_CELL_WIDTH: f32 = (PAGE_WIDTH - 132.0) / 2.0;
pub(crate) const STAT_CELL_HEIGHT: f32 = 55.0;
pub(crate) const STAT_GAP: f32 = 10.0;

/// Absolute origin (top-left reference point) of stat cell `index` in the
/// two-column grid whose first row starts at `top_y`, row-major.
pub(crate) fn stat_cell_origin(index: usize, top_y: f32) -> (f32, f32) {
    let col = (index % 2) as f32;
    let row = (index / 2) as f32;
    let x = MARGIN_X + col * (STAT_CELL_WIDTH + STAT_GAP);
    let y = top_y - row * (STAT_CELL_HEIGHT + STAT_GAP);
    (x, y)
}

/// Vertical extent a labeled section occupies on a profile page, including
/// title and padding, so its background rectangle can be reserved before any
/// text is drawn.
pub(crate) fn section_box_height(field_count: usize) -> f32 {
    field_count as f32 * 22.0 + 60.0
}

// Palette lifted from the product's web styles (Tailwind slate/blue/purple).
pub(crate) const SLATE_900: [f32; 3] = [0.059, 0.090, 0.165];
pub(crate) const BLUE_500: [f32; 3] = [0.231, 0.510, 0.965];
pub(crate) const PURPLE_500: [f32; 3] = [0.545, 0.361, 0.965];
pub(crate) const SLATE_50: [f32; 3] = [0.973, 0.980, 0.988];
pub(crate) const SLATE_200: [f32; 3] = [0.886, 0.910, 0.941];
pub(crate) const SLATE_500: [f32; 3] = [0.392, 0.455, 0.545];
pub(crate) const PURPLE_50: [f32; 3] = [0.933, 0.949, 1.0];
pub(crate) const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_grid_is_row_major() {
        let top = 500.0;
        let (x0, y0) = stat_cell_origin(0, top);
        let (x1, y1) = stat_cell_origin(1, top);
        let (x2, y2) = stat_cell_origin(2, top);
        let (x7, y7) = stat_cell_origin(7, top);

        assert_eq!((x0, y0), (MARGIN_X, top));
        assert_eq!(x1, MARGIN_X + STAT_CELL_WIDTH + STAT_GAP);
        assert_eq!(y1, top);
        // Second row drops by one cell height plus the gap.
        assert_eq!(x2, x0);
        assert_eq!(y2, top - STAT_CELL_HEIGHT - STAT_GAP);
        // Last of eight cells sits in column 1, row 3.
        assert_eq!(x7, x1);
        assert_eq!(y7, top - 3.0 * (STAT_CELL_HEIGHT + STAT_GAP));
    }

    #[test]
    fn stat_cells_fit_within_margins() {
        let (x1, _) = stat_cell_origin(1, 0.0);
        assert!(x1 + STAT_CELL_WIDTH <= PAGE_WIDTH - MARGIN_X + 20.0);
    }

    #[test]
    fn section_box_scales_with_field_count() {
        assert_eq!(section_box_height(0), 60.0);
        assert_eq!(section_box_height(4), 148.0);
        assert!(section_box_height(6) > section_box_height(5));
    }
}

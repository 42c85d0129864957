//! Drawing primitives for authored pages.
//!
//! Everything here appends operators to a single page's `Content` stream in
//! a fixed z-order (callers draw fills before borders before text before
//! images). None of these operations can fail; keeping coordinates on the
//! page is the caller's responsibility.

use pdf_writer::{Content, Name, Str};

use crate::format::{self, winansi_bytes};
use crate::pdf::layout::{
    ATTACHMENT_BAND_HEIGHT, BLUE_500, FOOTER_Y, HEADER_BAND_HEIGHT, IMAGE_MARGIN, MARGIN_X,
    PAGE_HEIGHT, PAGE_WIDTH, SLATE_50, SLATE_200, SLATE_500, SLATE_900, STAT_CELL_HEIGHT,
    STAT_CELL_WIDTH, STAT_VALUE_MAX_CHARS, WHITE,
};

/// Resource names of the two standard faces every authored page registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
}

impl Font {
    pub(crate) fn resource_name(self) -> Name<'static> {
        match self {
            Font::Regular => Name(b"F1"),
            Font::Bold => Name(b"F2"),
        }
    }
}

/// Show one run of text. The string is WinAnsi-encoded here, so unmappable
/// characters can never reach the content stream.
pub(crate) fn draw_text(
    content: &mut Content,
    font: Font,
    size: f32,
    color: [f32; 3],
    x: f32,
    y: f32,
    text: &str,
) {
    content
        .begin_text()
        .set_font(font.resource_name(), size)
        .set_fill_rgb(color[0], color[1], color[2])
        .next_line(x, y)
        .show(Str(&winansi_bytes(text)))
        .end_text();
}

pub(crate) fn fill_rect(content: &mut Content, color: [f32; 3], x: f32, y: f32, w: f32, h: f32) {
    content.save_state();
    content.set_fill_rgb(color[0], color[1], color[2]);
    content.rect(x, y, w, h);
    content.fill_nonzero();
    content.restore_state();
}

pub(crate) fn bordered_rect(
    content: &mut Content,
    fill: [f32; 3],
    border: [f32; 3],
    border_width: f32,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
) {
    content.save_state();
    content.set_fill_rgb(fill[0], fill[1], fill[2]);
    content.set_stroke_rgb(border[0], border[1], border[2]);
    content.set_line_width(border_width);
    content.rect(x, y, w, h);
    content.fill_nonzero_and_stroke();
    content.restore_state();
}

/// Cover header: a solid blue band overlaid with ten interpolation layers
/// fading toward purple at the top.
pub(crate) fn draw_header_band(content: &mut Content) {
    fill_rect(
        content,
        BLUE_500,
        0.0,
        PAGE_HEIGHT - HEADER_BAND_HEIGHT,
        PAGE_WIDTH,
        HEADER_BAND_HEIGHT,
    );
    let layer_height = HEADER_BAND_HEIGHT / 10.0;
    for i in 0..10 {
        let progress = i as f32 / 10.0;
        let color = [
            0.231 + (0.545 - 0.231) * progress,
            0.510 - (0.510 - 0.361) * progress,
            0.965,
        ];
        fill_rect(
            content,
            color,
            0.0,
            PAGE_HEIGHT - HEADER_BAND_HEIGHT + i as f32 * layer_height,
            PAGE_WIDTH,
            layer_height,
        );
    }
}

/// Section heading with the blue underline bar.
pub(crate) fn draw_section_title(content: &mut Content, title: &str, x: f32, y: f32) {
    draw_text(content, Font::Bold, 13.0, SLATE_900, x, y, title);
    fill_rect(content, BLUE_500, x, y - 4.0, 160.0, 2.5);
}

/// One labeled field row: bold label in the left column, wrapped value lines
/// in the right column. Returns the vertical space consumed.
pub(crate) fn draw_labeled_field(
    content: &mut Content,
    label: &str,
    value: &str,
    y: f32,
    value_x: f32,
    wrap_chars: usize,
) -> f32 {
    draw_text(content, Font::Bold, 10.0, SLATE_500, MARGIN_X, y, label);
    let lines = format::wrap(value, wrap_chars);
    for (i, line) in lines.iter().enumerate() {
        draw_text(
            content,
            Font::Regular,
            10.0,
            SLATE_900,
            value_x,
            y - i as f32 * 12.0,
            line,
        );
    }
    (lines.len() as f32 * 12.0 + 10.0).max(22.0)
}

/// One cell of the cover's highlight grid at the given grid origin. Values
/// beyond the character budget are truncated with an ellipsis marker.
pub(crate) fn draw_stat_cell(
    content: &mut Content,
    icon: &str,
    label: &str,
    value: &str,
    x: f32,
    y: f32,
) {
    bordered_rect(
        content,
        WHITE,
        SLATE_200,
        1.0,
        x,
        y - STAT_CELL_HEIGHT + 12.0,
        STAT_CELL_WIDTH,
        STAT_CELL_HEIGHT,
    );
    draw_text(content, Font::Bold, 10.0, BLUE_500, x + 12.0, y - 16.0, icon);
    draw_text(
        content,
        Font::Bold,
        7.5,
        SLATE_500,
        x + 26.0,
        y - 16.0,
        label,
    );

    let value = if value.chars().count() > STAT_VALUE_MAX_CHARS {
        let head: String = value.chars().take(STAT_VALUE_MAX_CHARS - 3).collect();
        format!("{head}...")
    } else {
        value.to_string()
    };
    draw_text(
        content,
        Font::Bold,
        11.0,
        SLATE_900,
        x + 12.0,
        y - 36.0,
        &value,
    );
}

/// Running footer carried by every page except the cover.
pub(crate) fn draw_footer(content: &mut Content, page_width: f32, page_number: usize) {
    draw_text(
        content,
        Font::Regular,
        8.0,
        SLATE_500,
        IMAGE_MARGIN,
        FOOTER_Y,
        &format!("DossierPro - Verified Rental Application | Page {page_number}"),
    );
    draw_text(
        content,
        Font::Regular,
        8.0,
        SLATE_500,
        page_width - 130.0,
        FOOTER_Y,
        "www.dossierpro.com",
    );
}

/// Label band across the top of an attachment page; the description is
/// uppercased the way the web product renders it.
pub(crate) fn draw_attachment_band(
    content: &mut Content,
    label: &str,
    page_width: f32,
    page_height: f32,
) {
    fill_rect(
        content,
        SLATE_50,
        0.0,
        page_height - ATTACHMENT_BAND_HEIGHT,
        page_width,
        ATTACHMENT_BAND_HEIGHT,
    );
    draw_text(
        content,
        Font::Bold,
        12.0,
        BLUE_500,
        IMAGE_MARGIN,
        page_height - 25.0,
        &label.to_uppercase(),
    );
}

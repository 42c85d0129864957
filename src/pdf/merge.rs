//! Attachment merging over the loaded base document.
//!
//! Foreign PDFs are imported object-by-object after renumbering past the base
//! document's id space, reparented under the base page tree, and stamped with
//! the label band and footer as an overlay content stream. Raster images are
//! rendered into standalone one-page documents (band and footer baked in) and
//! appended through the same import path, unstamped.

use std::fmt;
use std::io::Cursor;

use lopdf::content::{Content as PageContent, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use pdf_writer::{Filter, Name, Pdf, Rect, Ref};

use crate::format;
use crate::model::{AttachmentDescriptor, AttachmentFetcher, MediaType};
use crate::pdf::compose::{self, Font};
use crate::pdf::layout::{
    ATTACHMENT_BAND_HEIGHT, BLUE_500, FOOTER_Y, IMAGE_MARGIN, PAGE_HEIGHT, PAGE_WIDTH, SLATE_50,
    SLATE_500,
};

/// Result of one attempted merge. A skip never aborts assembly; the caller
/// logs it and moves on to the next attachment.
pub(crate) enum MergeOutcome {
    Merged { pages: usize },
    Skipped { reason: SkipReason },
}

pub(crate) enum SkipReason {
    UnsupportedType(String),
    Fetch(String),
    InvalidPdf(String),
    InvalidImage(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedType(declared) => {
                write!(f, "unsupported media type {declared:?}")
            }
            SkipReason::Fetch(cause) => write!(f, "fetch failed: {cause}"),
            SkipReason::InvalidPdf(cause) => write!(f, "unreadable PDF: {cause}"),
            SkipReason::InvalidImage(cause) => write!(f, "undecodable image: {cause}"),
        }
    }
}

/// Appends attachment pages to the base document, keeping a running page
/// count so every stamped footer carries the page's final 1-based position.
pub(crate) struct Merger<'a> {
    doc: &'a mut Document,
    pages_root: ObjectId,
    overlay_regular: ObjectId,
    overlay_bold: ObjectId,
    page_count: usize,
}

impl<'a> Merger<'a> {
    pub(crate) fn new(doc: &'a mut Document) -> Result<Self, lopdf::Error> {
        let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
        let pages_root = doc.get_dictionary(catalog_id)?.get(b"Pages")?.as_reference()?;
        let page_count = doc.get_pages().len();
        // Overlay text on foreign pages uses its own pair of standard fonts,
        // registered under names unlikely to collide with imported resources.
        let overlay_regular = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let overlay_bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        Ok(Self {
            doc,
            pages_root,
            overlay_regular,
            overlay_bold,
            page_count,
        })
    }

    pub(crate) fn merge(
        &mut self,
        att: &AttachmentDescriptor,
        store: &dyn AttachmentFetcher,
    ) -> MergeOutcome {
        let media = MediaType::classify(&att.media_type);
        if media == MediaType::Unsupported {
            return MergeOutcome::Skipped {
                reason: SkipReason::UnsupportedType(att.media_type.clone()),
            };
        }
        let bytes = match store.fetch(&att.stored_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                return MergeOutcome::Skipped {
                    reason: SkipReason::Fetch(e.to_string()),
                }
            }
        };
        match media {
            MediaType::Pdf => self.merge_pdf(att, &bytes),
            MediaType::Png | MediaType::Jpeg => self.merge_image(att, media, &bytes),
            MediaType::Unsupported => MergeOutcome::Skipped {
                reason: SkipReason::UnsupportedType(att.media_type.clone()),
            },
        }
    }

    fn merge_pdf(&mut self, att: &AttachmentDescriptor, bytes: &[u8]) -> MergeOutcome {
        let src = match Document::load_mem(bytes) {
            Ok(doc) => doc,
            Err(e) => {
                return MergeOutcome::Skipped {
                    reason: SkipReason::InvalidPdf(e.to_string()),
                }
            }
        };
        match self.append_document(src, Some(att.label())) {
            Ok(pages) => MergeOutcome::Merged { pages },
            Err(e) => MergeOutcome::Skipped {
                reason: SkipReason::InvalidPdf(e.to_string()),
            },
        }
    }

    fn merge_image(
        &mut self,
        att: &AttachmentDescriptor,
        media: MediaType,
        bytes: &[u8],
    ) -> MergeOutcome {
        let raster = match decode_raster(media, bytes) {
            Ok(raster) => raster,
            Err(cause) => {
                return MergeOutcome::Skipped {
                    reason: SkipReason::InvalidImage(cause),
                }
            }
        };
        let rendered = render_image_page(att.label(), self.page_count + 1, &raster);
        let src = match Document::load_mem(&rendered) {
            Ok(doc) => doc,
            Err(e) => {
                return MergeOutcome::Skipped {
                    reason: SkipReason::InvalidPdf(e.to_string()),
                }
            }
        };
        // Band and footer are already part of the rendered page.
        match self.append_document(src, None) {
            Ok(pages) => MergeOutcome::Merged { pages },
            Err(e) => MergeOutcome::Skipped {
                reason: SkipReason::InvalidPdf(e.to_string()),
            },
        }
    }

    /// Move every page of `src` to the end of the base page tree, in `src`'s
    /// own page order. With `stamp_label` set, each page also gets the
    /// overlay band and footer.
    fn append_document(
        &mut self,
        mut src: Document,
        stamp_label: Option<&str>,
    ) -> Result<usize, lopdf::Error> {
        // Inherited page-tree attributes must be flattened onto the page
        // dictionaries before their parent nodes are discarded.
        flatten_inherited_attributes(&mut src)?;

        src.renumber_objects_with(self.doc.max_id + 1);
        self.doc.max_id = src.max_id;

        let page_ids: Vec<ObjectId> = src.get_pages().into_values().collect();

        for (id, object) in std::mem::take(&mut src.objects) {
            // The source's own document structure must not survive the move;
            // everything a page references comes along as-is.
            match object.type_name().unwrap_or(b"") {
                b"Catalog" | b"Pages" | b"Outlines" | b"Outline" => {}
                _ => {
                    self.doc.objects.insert(id, object);
                }
            }
        }

        for page_id in &page_ids {
            {
                let page = self.doc.get_object_mut(*page_id)?.as_dict_mut()?;
                page.set("Parent", Object::Reference(self.pages_root));
            }
            append_kid(self.doc, self.pages_root, *page_id)?;
            self.page_count += 1;
            if let Some(label) = stamp_label {
                self.stamp_page(*page_id, label, self.page_count)?;
            }
        }

        Ok(page_ids.len())
    }

    /// Overlay the label band and footer onto an imported page: a bare `q`
    /// stream prepended so the page's own operators cannot leak graphics
    /// state into ours, then the overlay stream appended after the originals.
    fn stamp_page(
        &mut self,
        page_id: ObjectId,
        label: &str,
        page_number: usize,
    ) -> Result<(), lopdf::Error> {
        let (width, height) = page_dimensions(self.doc, page_id);
        let overlay = PageContent {
            operations: overlay_operations(label, page_number, width, height),
        }
        .encode()?;

        let save_id = self
            .doc
            .add_object(Object::Stream(Stream::new(dictionary! {}, b"q\n".to_vec())));
        let overlay_id = self
            .doc
            .add_object(Object::Stream(Stream::new(dictionary! {}, overlay)));

        let existing: Vec<Object> = {
            let page = self.doc.get_dictionary(page_id)?;
            match page.get(b"Contents") {
                Ok(Object::Reference(id)) => vec![Object::Reference(*id)],
                Ok(Object::Array(items)) => items.clone(),
                _ => Vec::new(),
            }
        };
        let mut contents = Vec::with_capacity(existing.len() + 2);
        contents.push(Object::Reference(save_id));
        contents.extend(existing);
        contents.push(Object::Reference(overlay_id));
        {
            let page = self.doc.get_object_mut(page_id)?.as_dict_mut()?;
            page.set("Contents", Object::Array(contents));
        }

        self.ensure_overlay_fonts(page_id)
    }

    /// Make the two overlay faces resolvable from the page's resources,
    /// whatever shape the imported document keeps them in.
    fn ensure_overlay_fonts(&mut self, page_id: ObjectId) -> Result<(), lopdf::Error> {
        enum ResLoc {
            Inline,
            Referenced(ObjectId),
            Missing,
        }

        let loc = {
            let page = self.doc.get_dictionary(page_id)?;
            match page.get(b"Resources") {
                Ok(Object::Reference(id)) => ResLoc::Referenced(*id),
                Ok(Object::Dictionary(_)) => ResLoc::Inline,
                _ => ResLoc::Missing,
            }
        };
        let regular = self.overlay_regular;
        let bold = self.overlay_bold;

        match loc {
            ResLoc::Missing => {
                let page = self.doc.get_object_mut(page_id)?.as_dict_mut()?;
                page.set(
                    "Resources",
                    Object::Dictionary(dictionary! {
                        "Font" => Object::Dictionary(overlay_font_dict(regular, bold)),
                    }),
                );
            }
            ResLoc::Inline => {
                let font_ref = {
                    let page = self.doc.get_dictionary(page_id)?;
                    match page.get(b"Resources") {
                        Ok(Object::Dictionary(res)) => match res.get(b"Font") {
                            Ok(Object::Reference(id)) => Some(*id),
                            _ => None,
                        },
                        _ => None,
                    }
                };
                match font_ref {
                    Some(fonts_id) => {
                        let fonts = self.doc.get_object_mut(fonts_id)?.as_dict_mut()?;
                        set_overlay_fonts(fonts, regular, bold);
                    }
                    None => {
                        let page = self.doc.get_object_mut(page_id)?.as_dict_mut()?;
                        let res = page.get_mut(b"Resources")?.as_dict_mut()?;
                        merge_overlay_fonts(res, regular, bold);
                    }
                }
            }
            ResLoc::Referenced(res_id) => {
                let font_ref = {
                    let res = self.doc.get_dictionary(res_id)?;
                    match res.get(b"Font") {
                        Ok(Object::Reference(id)) => Some(*id),
                        _ => None,
                    }
                };
                match font_ref {
                    Some(fonts_id) => {
                        let fonts = self.doc.get_object_mut(fonts_id)?.as_dict_mut()?;
                        set_overlay_fonts(fonts, regular, bold);
                    }
                    None => {
                        let res = self.doc.get_object_mut(res_id)?.as_dict_mut()?;
                        merge_overlay_fonts(res, regular, bold);
                    }
                }
            }
        }
        Ok(())
    }
}

fn overlay_font_dict(regular: ObjectId, bold: ObjectId) -> Dictionary {
    dictionary! {
        "DpHelv" => Object::Reference(regular),
        "DpHelvB" => Object::Reference(bold),
    }
}

fn set_overlay_fonts(fonts: &mut Dictionary, regular: ObjectId, bold: ObjectId) {
    fonts.set("DpHelv", Object::Reference(regular));
    fonts.set("DpHelvB", Object::Reference(bold));
}

fn merge_overlay_fonts(res: &mut Dictionary, regular: ObjectId, bold: ObjectId) {
    let has_font_dict = matches!(res.get(b"Font"), Ok(Object::Dictionary(_)));
    if has_font_dict {
        if let Ok(Object::Dictionary(fonts)) = res.get_mut(b"Font") {
            set_overlay_fonts(fonts, regular, bold);
        }
    } else {
        res.set("Font", Object::Dictionary(overlay_font_dict(regular, bold)));
    }
}

/// Append one page reference under the page tree root and bump its count.
fn append_kid(
    doc: &mut Document,
    pages_root: ObjectId,
    page_id: ObjectId,
) -> Result<(), lopdf::Error> {
    let pages = doc.get_object_mut(pages_root)?.as_dict_mut()?;

    let has_kids = matches!(pages.get(b"Kids"), Ok(Object::Array(_)));
    if has_kids {
        if let Ok(Object::Array(kids)) = pages.get_mut(b"Kids") {
            kids.push(Object::Reference(page_id));
        }
    } else {
        pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
    }

    let count = match pages.get(b"Count") {
        Ok(Object::Integer(n)) => *n + 1,
        _ => 1,
    };
    pages.set("Count", Object::Integer(count));
    Ok(())
}

/// Copy Resources/MediaBox/CropBox/Rotate down from ancestor Pages nodes onto
/// every page dictionary that lacks them. The ancestor nodes themselves are
/// dropped during import, so inheritance must be resolved here.
fn flatten_inherited_attributes(doc: &mut Document) -> Result<(), lopdf::Error> {
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    for page_id in page_ids {
        for key in [&b"Resources"[..], b"MediaBox", b"CropBox", b"Rotate"] {
            if doc.get_dictionary(page_id)?.get(key).is_ok() {
                continue;
            }
            if let Some(value) = inherited_page_attribute(doc, page_id, key) {
                let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
                page.set(key, value);
            }
        }
    }
    Ok(())
}

fn inherited_page_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut cursor = doc
        .get_dictionary(page_id)
        .ok()?
        .get(b"Parent")
        .ok()?
        .as_reference()
        .ok();
    while let Some(id) = cursor {
        let node = doc.get_dictionary(id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        cursor = node
            .get(b"Parent")
            .ok()
            .and_then(|parent| parent.as_reference().ok());
    }
    None
}

/// Width and height of the page's media box, tolerating integer or real
/// coordinates and a referenced box. Falls back to Letter.
fn page_dimensions(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    fn as_f32(object: &Object) -> Option<f32> {
        match object {
            Object::Integer(v) => Some(*v as f32),
            Object::Real(v) => Some(*v),
            _ => None,
        }
    }

    let rect = doc
        .get_dictionary(page_id)
        .ok()
        .and_then(|page| page.get(b"MediaBox").ok())
        .and_then(|object| match object {
            Object::Array(items) => Some(items.clone()),
            Object::Reference(id) => doc
                .get_object(*id)
                .ok()
                .and_then(|o| o.as_array().ok().cloned()),
            _ => None,
        });

    if let Some(items) = rect {
        if items.len() == 4 {
            if let (Some(x0), Some(y0), Some(x1), Some(y1)) = (
                as_f32(&items[0]),
                as_f32(&items[1]),
                as_f32(&items[2]),
                as_f32(&items[3]),
            ) {
                return (x1 - x0, y1 - y0);
            }
        }
    }
    (PAGE_WIDTH, PAGE_HEIGHT)
}

fn rgb_operands(color: [f32; 3]) -> Vec<Object> {
    color.iter().map(|&v| Object::Real(v)).collect()
}

fn text_run(font: &[u8], size: i64, color: [f32; 3], x: f32, y: f32, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![Object::Name(font.to_vec()), Object::Integer(size)]),
        Operation::new("rg", rgb_operands(color)),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        Operation::new(
            "Tj",
            vec![Object::String(
                format::winansi_bytes(text),
                StringFormat::Literal,
            )],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Operator list for the overlay stream appended after an imported page's own
/// content. Opens with `Q` to balance the prepended save.
fn overlay_operations(label: &str, page_number: usize, width: f32, height: f32) -> Vec<Operation> {
    let mut ops = vec![
        Operation::new("Q", vec![]),
        Operation::new("q", vec![]),
        Operation::new("rg", rgb_operands(SLATE_50)),
        Operation::new(
            "re",
            vec![
                Object::Integer(0),
                Object::Real(height - ATTACHMENT_BAND_HEIGHT),
                Object::Real(width),
                Object::Real(ATTACHMENT_BAND_HEIGHT),
            ],
        ),
        Operation::new("f", vec![]),
    ];
    ops.extend(text_run(
        b"DpHelvB",
        12,
        BLUE_500,
        IMAGE_MARGIN,
        height - 25.0,
        &label.to_uppercase(),
    ));
    ops.extend(text_run(
        b"DpHelv",
        8,
        SLATE_500,
        IMAGE_MARGIN,
        FOOTER_Y,
        &format!("DossierPro - Verified Rental Application | Page {page_number}"),
    ));
    ops.extend(text_run(
        b"DpHelv",
        8,
        SLATE_500,
        width - 130.0,
        FOOTER_Y,
        "www.dossierpro.com",
    ));
    ops.push(Operation::new("Q", vec![]));
    ops
}

/// Decoded raster attachment ready for embedding. JPEG data passes through
/// untouched as a DCT stream; PNG is decoded to raw RGB plus an optional
/// alpha plane for a soft mask.
pub(crate) struct Raster {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: RasterData,
}

pub(crate) enum RasterData {
    Jpeg(Vec<u8>),
    Png { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

fn decode_raster(media: MediaType, bytes: &[u8]) -> Result<Raster, String> {
    match media {
        MediaType::Jpeg => {
            let reader = image::ImageReader::with_format(
                std::io::BufReader::new(Cursor::new(bytes)),
                image::ImageFormat::Jpeg,
            );
            let (width, height) = reader.into_dimensions().map_err(|e| e.to_string())?;
            if width == 0 || height == 0 {
                return Err("zero-sized image".to_string());
            }
            Ok(Raster {
                width,
                height,
                data: RasterData::Jpeg(bytes.to_vec()),
            })
        }
        MediaType::Png => {
            let reader = image::ImageReader::with_format(
                std::io::BufReader::new(Cursor::new(bytes)),
                image::ImageFormat::Png,
            );
            let decoded = reader.decode().map_err(|e| e.to_string())?;
            let rgba = decoded.to_rgba8();
            let (width, height) = rgba.dimensions();
            if width == 0 || height == 0 {
                return Err("zero-sized image".to_string());
            }
            let has_alpha = rgba.pixels().any(|px| px.0[3] < 255);
            let rgb: Vec<u8> = rgba
                .pixels()
                .flat_map(|px| [px.0[0], px.0[1], px.0[2]])
                .collect();
            let alpha = has_alpha.then(|| rgba.pixels().map(|px| px.0[3]).collect());
            Ok(Raster {
                width,
                height,
                data: RasterData::Png { rgb, alpha },
            })
        }
        MediaType::Pdf | MediaType::Unsupported => Err("not a raster media type".to_string()),
    }
}

/// Render a single standalone page carrying the label band, the image scaled
/// to fit within the margins (never upscaled past its fit box) and centered
/// horizontally, and the running footer.
fn render_image_page(label: &str, page_number: usize, raster: &Raster) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let page_id = alloc();
    let content_id = alloc();
    let helv_id = alloc();
    let helv_bold_id = alloc();
    let image_id = alloc();

    pdf.type1_font(helv_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(helv_bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    match &raster.data {
        RasterData::Jpeg(data) => {
            let mut xobj = pdf.image_xobject(image_id, data);
            xobj.filter(Filter::DctDecode);
            xobj.width(raster.width as i32);
            xobj.height(raster.height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
        }
        RasterData::Png { rgb, alpha } => {
            let mask_ref = if let Some(alpha) = alpha {
                let compressed = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
                let mask_id = alloc();
                let mut mask = pdf.image_xobject(mask_id, &compressed);
                mask.filter(Filter::FlateDecode);
                mask.width(raster.width as i32);
                mask.height(raster.height as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                Some(mask_id)
            } else {
                None
            };
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(rgb, 6);
            let mut xobj = pdf.image_xobject(image_id, &compressed);
            xobj.filter(Filter::FlateDecode);
            xobj.width(raster.width as i32);
            xobj.height(raster.height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_id) = mask_ref {
                xobj.s_mask(mask_id);
            }
        }
    }

    let mut content = pdf_writer::Content::new();
    compose::draw_attachment_band(&mut content, label, PAGE_WIDTH, PAGE_HEIGHT);

    let avail_w = PAGE_WIDTH - 2.0 * IMAGE_MARGIN;
    let avail_h = PAGE_HEIGHT - 120.0;
    let scale = (avail_w / raster.width as f32).min(avail_h / raster.height as f32);
    let w = raster.width as f32 * scale;
    let h = raster.height as f32 * scale;
    let x = (PAGE_WIDTH - w) / 2.0;
    let y = PAGE_HEIGHT - 80.0 - h;
    content.save_state();
    content.transform([w, 0.0, 0.0, h, x, y]);
    content.x_object(Name(b"Im1"));
    content.restore_state();

    compose::draw_footer(&mut content, PAGE_WIDTH, page_number);

    let raw = content.finish();
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
    pdf.stream(content_id, &compressed)
        .filter(Filter::FlateDecode);

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);
    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(content_id);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            fonts.pair(Font::Regular.resource_name(), helv_id);
            fonts.pair(Font::Bold.resource_name(), helv_bold_id);
        }
        let mut xobjects = resources.x_objects();
        xobjects.pair(Name(b"Im1"), image_id);
    }

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_scale_never_upscales_relative_fit() {
        // A 3000x2000 raster against the 512x672 fit box scales by width.
        let scale = (512.0f32 / 3000.0).min(672.0 / 2000.0);
        assert!((scale - 512.0 / 3000.0).abs() < 1e-6);
        let w = 3000.0 * scale;
        let h = 2000.0 * scale;
        assert!((w - 512.0).abs() < 1e-3);
        assert!(h < 672.0);
    }

    #[test]
    fn overlay_stream_balances_graphics_state() {
        let ops = overlay_operations("Pay stub", 4, 612.0, 792.0);
        assert_eq!(ops.first().unwrap().operator, "Q");
        assert_eq!(ops.last().unwrap().operator, "Q");
        let saves = ops.iter().filter(|op| op.operator == "q").count();
        let restores = ops.iter().filter(|op| op.operator == "Q").count();
        // One restore pairs with the prepended save stream.
        assert_eq!(restores, saves + 1);
    }

    #[test]
    fn footer_text_carries_page_number() {
        let ops = overlay_operations("Lease", 7, 612.0, 792.0);
        let strings: Vec<Vec<u8>> = ops
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(strings.len(), 3);
        assert_eq!(strings[0], b"LEASE".to_vec());
        assert!(String::from_utf8_lossy(&strings[1]).contains("Page 7"));
    }
}

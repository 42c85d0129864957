//! Document assembly: authored cover/profile pages rendered with
//! `pdf-writer`, then attachment merging over the loaded page graph.

mod compose;
mod layout;
mod merge;

use chrono::Utc;
use pdf_writer::{Content, Filter, Pdf, Rect, Ref};

use crate::error::Error;
use crate::format::{self, NOT_SPECIFIED};
use crate::model::{ApplicantRecord, AttachmentDescriptor, AttachmentFetcher};
use compose::Font;
use layout::{
    FIELD_VALUE_X, FIELD_WRAP_CHARS, MARGIN_X, PAGE_HEIGHT, PAGE_WIDTH, PROFILE_BOTTOM_LIMIT,
    PURPLE_50, PURPLE_500, SLATE_50, SLATE_200, SLATE_500, SLATE_900, WHITE,
};
use merge::{MergeOutcome, Merger};

/// Render the cover and profile pages into a complete single-document byte
/// sequence. This is the only place a malformed record could abort assembly,
/// and the formatter's total placeholder policy makes that unreachable in
/// practice.
pub(crate) fn render_base(
    record: &ApplicantRecord,
    attachments: &[AttachmentDescriptor],
) -> Result<Vec<u8>, Error> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let helv_id = alloc();
    let helv_bold_id = alloc();

    pdf.type1_font(helv_id)
        .base_font(pdf_writer::Name(b"Helvetica"))
        .encoding_predefined(pdf_writer::Name(b"WinAnsiEncoding"));
    pdf.type1_font(helv_bold_id)
        .base_font(pdf_writer::Name(b"Helvetica-Bold"))
        .encoding_predefined(pdf_writer::Name(b"WinAnsiEncoding"));

    let age = record
        .date_of_birth
        .map(|dob| format::age_from_birth_date(dob, Utc::now().date_naive()));

    let mut contents: Vec<Content> = Vec::new();
    contents.push(render_cover(record, age));
    render_profile_pages(record, attachments, age, &mut contents);

    let n = contents.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, content) in contents.into_iter().enumerate() {
        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Font::Regular.resource_name(), helv_id);
        fonts.pair(Font::Bold.resource_name(), helv_bold_id);
    }

    Ok(pdf.finish())
}

/// Load the authored base document, run the merger over the attachment list
/// in its original order, and serialize. Per-attachment failures are logged
/// and skipped; only final serialization can fail here.
pub(crate) fn merge_and_serialize(
    base: Vec<u8>,
    attachments: &[AttachmentDescriptor],
    store: &dyn AttachmentFetcher,
) -> Result<Vec<u8>, Error> {
    let mut doc = lopdf::Document::load_mem(&base)?;
    {
        let mut merger = Merger::new(&mut doc)?;
        for att in attachments {
            match merger.merge(att, store) {
                MergeOutcome::Merged { pages } => {
                    log::info!(
                        "merged attachment {:?} ({}, {} page(s))",
                        att.file_name,
                        att.media_type,
                        pages
                    );
                }
                MergeOutcome::Skipped { reason } => {
                    log::warn!(
                        "skipping attachment {:?} ({}): {}",
                        att.file_name,
                        att.stored_path,
                        reason
                    );
                }
            }
        }
    }
    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

fn or_not_specified(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_SPECIFIED.to_string(),
    }
}

fn render_cover(record: &ApplicantRecord, age: Option<i32>) -> Content {
    let mut c = Content::new();

    compose::draw_header_band(&mut c);
    compose::draw_text(
        &mut c,
        Font::Bold,
        32.0,
        WHITE,
        MARGIN_X,
        PAGE_HEIGHT - 65.0,
        "RENTAL APPLICATION",
    );
    compose::draw_text(
        &mut c,
        Font::Regular,
        13.0,
        WHITE,
        MARGIN_X,
        PAGE_HEIGHT - 95.0,
        "Professional Tenant Dossier",
    );
    compose::fill_rect(&mut c, SLATE_200, 0.0, PAGE_HEIGHT - 155.0, PAGE_WIDTH, 2.0);

    let mut y = PAGE_HEIGHT - 190.0;
    compose::draw_text(
        &mut c,
        Font::Bold,
        36.0,
        SLATE_900,
        MARGIN_X,
        y,
        &record.full_name.to_uppercase(),
    );
    y -= 30.0;

    let subtitle = match (age, record.job_title.as_deref()) {
        (Some(age), Some(title)) => format!("{age} years old \u{2022} {title}"),
        (Some(age), None) => format!("{age} years old"),
        (None, Some(title)) => title.to_string(),
        (None, None) => String::new(),
    };
    compose::draw_text(&mut c, Font::Regular, 14.0, SLATE_500, MARGIN_X, y, &subtitle);
    y -= 60.0;

    // "Applying for" card with a soft three-step edge behind it.
    let card_x = 46.0;
    let card_w = PAGE_WIDTH - 92.0;
    let card_h = 100.0;
    let card_y = y - 95.0;
    for i in 0..3 {
        let o = i as f32;
        compose::fill_rect(
            &mut c,
            SLATE_200,
            card_x - o,
            card_y - o,
            card_w + o * 2.0,
            card_h + o * 2.0,
        );
    }
    compose::bordered_rect(&mut c, SLATE_50, SLATE_200, 1.5, card_x, card_y, card_w, card_h);

    y -= 15.0;
    compose::draw_text(
        &mut c,
        Font::Bold,
        10.0,
        PURPLE_500,
        card_x + 20.0,
        y,
        "APPLYING FOR",
    );
    y -= 22.0;
    compose::draw_text(
        &mut c,
        Font::Bold,
        16.0,
        SLATE_900,
        card_x + 20.0,
        y,
        &or_not_specified(Some(record.property_address.clone())),
    );
    y -= 20.0;
    if let Some(landlord) = &record.landlord_name {
        compose::draw_text(
            &mut c,
            Font::Regular,
            12.0,
            SLATE_500,
            card_x + 20.0,
            y,
            &format!("Attention: {landlord}"),
        );
        y -= 18.0;
    }
    let move_in = or_not_specified(record.move_in_date.map(format::format_long_date));
    compose::draw_text(
        &mut c,
        Font::Regular,
        12.0,
        SLATE_500,
        card_x + 20.0,
        y,
        &format!("Move-in: {move_in}"),
    );
    y -= 40.0;

    compose::draw_text(
        &mut c,
        Font::Bold,
        16.0,
        SLATE_900,
        MARGIN_X,
        y,
        "APPLICATION HIGHLIGHTS",
    );
    y -= 30.0;

    for (i, (icon, label, value)) in cover_stats(record).iter().enumerate() {
        let (x, cell_y) = layout::stat_cell_origin(i, y);
        compose::draw_stat_cell(&mut c, icon, label, value, x, cell_y);
    }

    compose::draw_text(
        &mut c,
        Font::Regular,
        8.0,
        SLATE_500,
        MARGIN_X,
        35.0,
        "This application includes verified documents and complete tenant information.",
    );
    compose::draw_text(
        &mut c,
        Font::Regular,
        8.0,
        SLATE_500,
        MARGIN_X,
        25.0,
        &format!(
            "Generated by DossierPro on {}",
            format::format_long_date(record.created_at.date_naive())
        ),
    );

    c
}

/// The fixed eight highlight cells, in grid order.
fn cover_stats(record: &ApplicantRecord) -> [(&'static str, &'static str, String); 8] {
    [
        ("#", "EMPLOYMENT", or_not_specified(record.employer.clone())),
        (
            "$",
            "INCOME",
            or_not_specified(record.monthly_income.map(format::format_currency_monthly)),
        ),
        ("#", "EXPERIENCE", or_not_specified(record.years_at_job.clone())),
        (
            "*",
            "HOUSEHOLD",
            format::household_summary(record.household.as_ref(), record.num_occupants),
        ),
        ("o", "SMOKING", format::smoking_label(record.smoking.as_ref())),
        ("*", "PETS", format::pet_summary(record.pets.as_ref())),
        ("#", "VEHICLE", format::vehicle_summary(record.vehicle.as_ref())),
        ("*", "VERIFIED", "DossierPro".to_string()),
    ]
}

struct Section {
    title: &'static str,
    shaded: bool,
    fields: Vec<(&'static str, String)>,
}

fn profile_sections(record: &ApplicantRecord, age: Option<i32>) -> Vec<Section> {
    let mut personal = vec![(
        "Full Name:",
        or_not_specified(Some(record.full_name.clone())),
    )];
    if let Some(age) = age {
        personal.push(("Age:", format!("{age} years old")));
    }
    personal.push(("Email:", or_not_specified(Some(record.email.clone()))));
    if let Some(phone) = &record.phone {
        personal.push(("Phone:", phone.clone()));
    }
    personal.push(("Current City:", or_not_specified(record.city.clone())));
    if let Some(address) = &record.current_address {
        personal.push(("Current Address:", address.clone()));
    }

    let employment = vec![
        ("Employer:", or_not_specified(record.employer.clone())),
        ("Position:", or_not_specified(record.job_title.clone())),
        (
            "Monthly Income:",
            or_not_specified(record.monthly_income.map(format::format_currency_gross)),
        ),
        (
            "Years at Position:",
            or_not_specified(record.years_at_job.clone()),
        ),
    ];

    let mut lifestyle = Vec::new();
    if let Some(age) = age {
        lifestyle.push(("Age:", format!("{age} years old")));
    }
    lifestyle.push((
        "Household Type:",
        format::household_detailed(
            record.household.as_ref(),
            record.num_occupants,
            record.num_children,
        ),
    ));
    lifestyle.push(("Smoking:", format::smoking_label(record.smoking.as_ref())));
    lifestyle.push(("Pets:", format::pet_detailed(record.pets.as_ref())));
    lifestyle.push(("Vehicle:", format::vehicle_detailed(record.vehicle.as_ref())));

    let mut rental = vec![
        (
            "Property:",
            or_not_specified(Some(record.property_address.clone())),
        ),
        (
            "Move-in Date:",
            or_not_specified(record.move_in_date.map(format::format_long_date)),
        ),
        (
            "Number of Occupants:",
            or_not_specified(record.num_occupants.map(|n| n.to_string())),
        ),
    ];
    if let Some(reason) = &record.reason_for_moving {
        rental.push(("Reason for Moving:", reason.clone()));
    }
    if let Some(message) = &record.personal_message {
        rental.push(("Personal Message:", message.clone()));
    }

    vec![
        Section {
            title: "PERSONAL INFORMATION",
            shaded: false,
            fields: personal,
        },
        Section {
            title: "EMPLOYMENT INFORMATION",
            shaded: true,
            fields: employment,
        },
        Section {
            title: "LIFESTYLE & HABITS",
            shaded: false,
            fields: lifestyle,
        },
        Section {
            title: "RENTAL APPLICATION DETAILS",
            shaded: true,
            fields: rental,
        },
    ]
}

/// Accumulates profile pages, flushing to a new page whenever the next block
/// would cross the bottom limit. Footers are stamped at flush time with the
/// page's final position (the cover is page 1 and carries none).
struct ProfileWriter<'a> {
    contents: &'a mut Vec<Content>,
    current: Content,
    y: f32,
}

impl<'a> ProfileWriter<'a> {
    fn new(contents: &'a mut Vec<Content>) -> Self {
        Self {
            contents,
            current: Content::new(),
            y: PAGE_HEIGHT - 80.0,
        }
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < PROFILE_BOTTOM_LIMIT {
            self.flush();
        }
    }

    fn flush(&mut self) {
        let mut done = std::mem::replace(&mut self.current, Content::new());
        compose::draw_footer(&mut done, PAGE_WIDTH, self.contents.len() + 1);
        self.contents.push(done);
        self.y = PAGE_HEIGHT - 80.0;
    }
}

fn render_profile_pages(
    record: &ApplicantRecord,
    attachments: &[AttachmentDescriptor],
    age: Option<i32>,
    contents: &mut Vec<Content>,
) {
    let mut w = ProfileWriter::new(contents);

    compose::draw_text(
        &mut w.current,
        Font::Bold,
        32.0,
        SLATE_900,
        MARGIN_X,
        w.y,
        "TENANT PROFILE",
    );
    w.y -= 60.0;

    for section in profile_sections(record, age) {
        let box_h = layout::section_box_height(section.fields.len());
        w.ensure_room(box_h + 25.0);
        if section.shaded {
            compose::fill_rect(
                &mut w.current,
                SLATE_50,
                40.0,
                w.y - box_h + 20.0,
                PAGE_WIDTH - 80.0,
                box_h,
            );
        }
        compose::draw_section_title(&mut w.current, section.title, MARGIN_X, w.y);
        w.y -= 25.0;
        for (label, value) in &section.fields {
            let advance = compose::draw_labeled_field(
                &mut w.current,
                label,
                value,
                w.y,
                FIELD_VALUE_X,
                FIELD_WRAP_CHARS,
            );
            w.y -= advance;
        }
        w.y -= 25.0;
    }

    // Documents-included summary box.
    w.y -= 20.0;
    let doc_lines: Vec<String> = if attachments.is_empty() {
        vec!["No documents uploaded".to_string()]
    } else {
        attachments
            .iter()
            .map(|att| format!("* {}", att.label()))
            .collect()
    };
    let box_h = (55.0 + doc_lines.len() as f32 * 16.0 + 20.0).max(115.0);
    w.ensure_room(box_h + 10.0);

    let box_x = 50.0;
    let box_y = w.y - box_h;
    compose::fill_rect(&mut w.current, PURPLE_50, box_x, box_y, PAGE_WIDTH - 100.0, box_h);
    compose::fill_rect(&mut w.current, PURPLE_500, box_x, box_y, 4.0, box_h);

    w.y -= 15.0;
    compose::draw_text(
        &mut w.current,
        Font::Bold,
        10.0,
        SLATE_900,
        box_x + 20.0,
        w.y,
        "DOCUMENTS INCLUDED IN THIS APPLICATION",
    );
    w.y -= 22.0;
    for line in &doc_lines {
        compose::draw_text(
            &mut w.current,
            Font::Regular,
            9.0,
            SLATE_900,
            box_x + 20.0,
            w.y,
            line,
        );
        w.y -= 16.0;
    }
    w.y -= 8.0;
    compose::draw_text(
        &mut w.current,
        Font::Regular,
        8.0,
        SLATE_500,
        box_x + 20.0,
        w.y,
        "All documents have been verified and organized by DossierPro.",
    );

    w.flush();
}

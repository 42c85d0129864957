use std::collections::HashMap;
use std::io::Cursor;

use chrono::{NaiveDate, TimeZone, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use dossier_pdf::{
    assemble_dossier, ApplicantRecord, AttachmentDescriptor, AttachmentFetcher, FetchError,
    HouseholdType, PetSpecies, PetStatus, Pets, SmokingStatus, VehicleStatus,
};

/// In-memory stand-in for the storage backend.
struct MapStore(HashMap<String, Vec<u8>>);

impl MapStore {
    fn new() -> Self {
        Self(HashMap::new())
    }

    fn insert(&mut self, path: &str, bytes: Vec<u8>) {
        self.0.insert(path.to_string(), bytes);
    }
}

impl AttachmentFetcher for MapStore {
    fn fetch(&self, stored_path: &str) -> Result<Vec<u8>, FetchError> {
        self.0
            .get(stored_path)
            .cloned()
            .ok_or_else(|| FetchError::new(format!("no such object: {stored_path}")))
    }
}

fn sample_record() -> ApplicantRecord {
    ApplicantRecord {
        full_name: "Maria Gonzalez".into(),
        email: "maria@example.com".into(),
        phone: Some("+1 555 0100".into()),
        city: Some("Austin".into()),
        date_of_birth: NaiveDate::from_ymd_opt(1994, 5, 12),
        property_address: "12 Elm Street, Apt 4".into(),
        landlord_name: Some("Harold Finch".into()),
        move_in_date: NaiveDate::from_ymd_opt(2026, 10, 1),
        num_occupants: Some(2),
        household: Some(HouseholdType::Couple),
        employer: Some("Acme Analytics".into()),
        job_title: Some("Data Engineer".into()),
        monthly_income: Some(6400),
        years_at_job: Some("3 years".into()),
        smoking: Some(SmokingStatus::NonSmoker),
        pets: Some(PetStatus::Owned(Pets {
            species: vec![PetSpecies::Dog],
            count: Some(1),
            dog_details: Some("small terrier".into()),
            cat_details: None,
        })),
        vehicle: Some(VehicleStatus::Owned {
            parking_spaces: Some(1),
        }),
        created_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        ..Default::default()
    }
}

fn att(path: &str, description: &str, file_name: &str, media_type: &str) -> AttachmentDescriptor {
    AttachmentDescriptor {
        stored_path: path.into(),
        description: Some(description.into()),
        file_name: file_name.into(),
        media_type: media_type.into(),
    }
}

/// Minimal well-formed PDF with one text page per entry. Resources and
/// MediaBox live on the Pages node so merging has to resolve inheritance.
fn simple_pdf(page_texts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => Object::Reference(font_id) },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in page_texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Object::Array(kids),
            "Count" => Object::Integer(count),
            "Resources" => Object::Reference(resources_id),
            "MediaBox" => Object::Array(vec![0.into(), 0.into(), 595.into(), 842.into()]),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize fixture PDF");
    bytes
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([120, 180, 60, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode PNG fixture");
    bytes
}

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .expect("encode JPEG fixture");
    bytes
}

fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("output must be a readable PDF")
}

fn ordered_page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// All `Tj` string literals on one page, joined with newlines.
fn page_text(doc: &Document, page_id: ObjectId) -> String {
    let data = doc.get_page_content(page_id).expect("page content");
    let content = Content::decode(&data).expect("decodable content stream");
    let mut out = String::new();
    for op in content.operations {
        if op.operator == "Tj" {
            if let Some(Object::String(bytes, _)) = op.operands.first() {
                out.push_str(&String::from_utf8_lossy(bytes));
                out.push('\n');
            }
        }
    }
    out
}

fn all_page_texts(doc: &Document) -> Vec<String> {
    ordered_page_ids(doc)
        .into_iter()
        .map(|id| page_text(doc, id))
        .collect()
}

#[test]
fn cover_and_profile_without_attachments() {
    let _ = env_logger::try_init();

    let record = sample_record();
    let bytes = assemble_dossier(&record, &[], &MapStore::new()).expect("assembly");
    let doc = load(&bytes);
    let texts = all_page_texts(&doc);

    assert!(texts.len() >= 2, "expected cover plus profile pages");

    // Cover carries the headline and the uppercased applicant name, no footer.
    assert!(texts[0].contains("RENTAL APPLICATION"));
    assert!(texts[0].contains("MARIA GONZALEZ"));
    assert!(texts[0].contains("APPLYING FOR"));
    assert!(texts[0].contains("$6,400/month"));
    assert!(!texts[0].contains("Page 1"));

    // Profile starts on page 2 with a numbered footer.
    assert!(texts[1].contains("TENANT PROFILE"));
    assert!(texts[1].contains("Page 2"));
    assert!(texts[1].contains("www.dossierpro.com"));

    let joined = texts.join("\n");
    assert!(joined.contains("No documents uploaded"));
    assert!(joined.contains("$6,400 (before taxes)"));
    assert!(joined.contains("1 dog(s) (small terrier)"));
}

#[test]
fn optional_fields_render_placeholder() {
    let record = ApplicantRecord {
        full_name: "Jo Smith".into(),
        email: "jo@example.com".into(),
        property_address: "9 Oak Lane".into(),
        created_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
        ..Default::default()
    };
    let bytes = assemble_dossier(&record, &[], &MapStore::new()).expect("assembly");
    let joined = all_page_texts(&load(&bytes)).join("\n");

    assert!(joined.contains("Not specified"));
    // No optional field may render as an empty value with a dangling label.
    assert!(joined.contains("Employer:"));
    assert!(joined.contains("Move-in:"));
}

#[test]
fn attachments_append_in_declared_order() {
    let _ = env_logger::try_init();

    let mut store = MapStore::new();
    store.insert("docs/lease.pdf", simple_pdf(&["lease page one", "lease page two"]));
    store.insert("docs/id.png", png_bytes(400, 300));
    store.insert("docs/paystub.jpg", jpeg_bytes(640, 480));

    let attachments = vec![
        att("docs/lease.pdf", "Lease agreement", "lease.pdf", "application/pdf"),
        att("docs/id.png", "Photo ID", "id.png", "image/png"),
        att("docs/paystub.jpg", "Pay stub", "paystub.jpg", "image/jpeg"),
    ];

    let record = sample_record();
    let with = assemble_dossier(&record, &attachments, &store).expect("assembly");
    // Same descriptors against an empty store: everything skipped, so the
    // difference is exactly the attachment pages.
    let without = assemble_dossier(&record, &attachments, &MapStore::new()).expect("assembly");

    let doc = load(&with);
    let texts = all_page_texts(&doc);
    let base_pages = all_page_texts(&load(&without)).len();
    assert_eq!(texts.len(), base_pages + 4);

    // Both lease pages carry the uppercased band label and keep their own text.
    assert!(texts[base_pages].contains("LEASE AGREEMENT"));
    assert!(texts[base_pages].contains("lease page one"));
    assert!(texts[base_pages + 1].contains("LEASE AGREEMENT"));
    assert!(texts[base_pages + 1].contains("lease page two"));
    assert!(texts[base_pages + 2].contains("PHOTO ID"));
    assert!(texts[base_pages + 3].contains("PAY STUB"));

    // Footers number pages by final position, through to the last page.
    assert!(texts[base_pages].contains(&format!("Page {}", base_pages + 1)));
    assert!(texts[base_pages + 3].contains(&format!("Page {}", base_pages + 4)));

    // The documents summary lists every attachment by label.
    let joined = texts.join("\n");
    assert!(joined.contains("* Lease agreement"));
    assert!(joined.contains("* Photo ID"));
    assert!(joined.contains("* Pay stub"));
}

#[test]
fn unusable_attachments_are_skipped_not_fatal() {
    let _ = env_logger::try_init();

    let mut store = MapStore::new();
    store.insert("docs/notes.gif", vec![0x47, 0x49, 0x46]);
    store.insert("docs/corrupt.pdf", b"%PDF-1.7 garbage".to_vec());
    store.insert("docs/ok.pdf", simple_pdf(&["reference letter"]));

    let attachments = vec![
        att("docs/notes.gif", "Notes", "notes.gif", "image/gif"),
        att("docs/missing.pdf", "Old lease", "missing.pdf", "application/pdf"),
        att("docs/corrupt.pdf", "Corrupt", "corrupt.pdf", "application/pdf"),
        att("docs/ok.pdf", "Reference letter", "ok.pdf", "application/pdf"),
    ];

    let record = sample_record();
    let bytes = assemble_dossier(&record, &attachments, &store).expect("assembly");
    let without = assemble_dossier(&record, &attachments, &MapStore::new()).expect("assembly");

    let texts = all_page_texts(&load(&bytes));
    let base_pages = all_page_texts(&load(&without)).len();

    // Only the readable PDF contributed a page.
    assert_eq!(texts.len(), base_pages + 1);
    let last = texts.last().unwrap();
    assert!(last.contains("REFERENCE LETTER"));
    assert!(last.contains("reference letter"));
    assert!(last.contains(&format!("Page {}", base_pages + 1)));
}

#[test]
fn oversized_image_is_scaled_to_fit() {
    let mut store = MapStore::new();
    store.insert("docs/floorplan.jpg", jpeg_bytes(3000, 2000));
    let attachments = vec![att(
        "docs/floorplan.jpg",
        "Floor plan",
        "floorplan.jpg",
        "image/jpeg",
    )];

    let record = sample_record();
    let bytes = assemble_dossier(&record, &attachments, &store).expect("assembly");
    let doc = load(&bytes);
    let page_ids = ordered_page_ids(&doc);
    let last = *page_ids.last().unwrap();

    let data = doc.get_page_content(last).expect("page content");
    let content = Content::decode(&data).expect("decodable content stream");
    let cm = content
        .operations
        .iter()
        .find(|op| op.operator == "cm")
        .expect("image placement matrix");

    fn num(object: &Object) -> f32 {
        match object {
            Object::Integer(v) => *v as f32,
            Object::Real(v) => *v,
            other => panic!("unexpected matrix operand: {other:?}"),
        }
    }

    // 3000x2000 against the 512-wide fit box scales by width: 512 points
    // wide, centered at x=50, and never drawn at natural size.
    let scaled_w = num(&cm.operands[0]);
    let scaled_h = num(&cm.operands[3]);
    let x = num(&cm.operands[4]);
    assert!((scaled_w - 512.0).abs() < 0.5, "width was {scaled_w}");
    assert!((scaled_h - 2000.0 * (512.0 / 3000.0)).abs() < 0.5);
    assert!((x - 50.0).abs() < 0.5);
}

#[test]
fn unicode_in_record_never_breaks_assembly() {
    let record = ApplicantRecord {
        full_name: "Łukasz Kowalski 家".into(),
        email: "lukasz@example.com".into(),
        property_address: "✓ verified address — 12 Elm".into(),
        personal_message: Some("Looking forward 🏠 to hearing from you".into()),
        created_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
        ..Default::default()
    };
    let bytes = assemble_dossier(&record, &[], &MapStore::new()).expect("assembly");
    let joined = all_page_texts(&load(&bytes)).join("\n");

    // The checkmark becomes an asterisk, unmappable glyphs become '?'.
    assert!(joined.contains("* verified address"));
    assert!(joined.contains("?UKASZ KOWALSKI ?"));
    assert!(!joined.contains('🏠'));
}

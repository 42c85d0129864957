mod error;
mod format;
mod model;
mod pdf;

pub use error::{Error, FetchError};
pub use format::{
    age_from_birth_date, format_currency_gross, format_currency_monthly, format_long_date,
    sanitize, wrap, NOT_SPECIFIED,
};
pub use model::{
    ApplicantRecord, AttachmentDescriptor, AttachmentFetcher, HouseholdType, MediaType,
    PetSpecies, PetStatus, Pets, SmokingStatus, VehicleStatus,
};

use std::time::Instant;

/// Assemble the complete dossier: styled cover and profile pages built from
/// the record, followed by every usable attachment in its original order.
/// Unusable attachments (unsupported type, fetch failure, unreadable bytes)
/// are logged and skipped; the call fails only if the base document cannot
/// be produced or the final document cannot be serialized.
pub fn assemble_dossier(
    record: &ApplicantRecord,
    attachments: &[AttachmentDescriptor],
    store: &dyn AttachmentFetcher,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let base = pdf::render_base(record, attachments)?;
    let t_render = t0.elapsed();

    let bytes = pdf::merge_and_serialize(base, attachments, store)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, merge={:.1}ms, total={:.1}ms (output {} bytes, {} attachment(s))",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
        attachments.len(),
    );

    Ok(bytes)
}

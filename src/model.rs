use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// One fully-populated applicant record as supplied by the record store.
///
/// Optional fields may be absent; the formatter renders every absence as an
/// explicit "Not specified" placeholder, never a blank page element.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub current_address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub property_address: String,
    pub landlord_name: Option<String>,
    pub move_in_date: Option<NaiveDate>,
    pub num_occupants: Option<u32>,
    pub household: Option<HouseholdType>,
    pub num_children: Option<u32>,
    /// Captured by the upload form; carried for round-tripping but not
    /// rendered anywhere in the dossier.
    pub children_ages: Option<String>,
    pub employer: Option<String>,
    pub job_title: Option<String>,
    /// Gross monthly income in whole currency units.
    pub monthly_income: Option<u64>,
    pub years_at_job: Option<String>,
    pub smoking: Option<SmokingStatus>,
    pub pets: Option<PetStatus>,
    pub vehicle: Option<VehicleStatus>,
    pub reason_for_moving: Option<String>,
    pub personal_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Default for ApplicantRecord {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: None,
            city: None,
            current_address: None,
            date_of_birth: None,
            property_address: String::new(),
            landlord_name: None,
            move_in_date: None,
            num_occupants: None,
            household: None,
            num_children: None,
            children_ages: None,
            employer: None,
            job_title: None,
            monthly_income: None,
            years_at_job: None,
            smoking: None,
            pets: None,
            vehicle: None,
            reason_for_moving: None,
            personal_message: None,
            created_at: DateTime::UNIX_EPOCH,
        }
    }
}

/// Household composition. Values the upstream form does not know about are
/// captured verbatim in `Other` and rendered as-is instead of failing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HouseholdType {
    Single,
    Couple,
    Family,
    Roommates,
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SmokingStatus {
    NonSmoker,
    Occasional,
    Smoker,
    Other(String),
}

/// Pet ownership as declared on the application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PetStatus {
    NoPets,
    Owned(Pets),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pets {
    pub species: Vec<PetSpecies>,
    pub count: Option<u32>,
    pub dog_details: Option<String>,
    pub cat_details: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PetSpecies {
    Dog,
    Cat,
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum VehicleStatus {
    NoVehicle,
    Owned { parking_spaces: Option<u32> },
}

/// One uploaded file associated with the applicant, in the order the
/// applicant supplied it. `media_type` is the *declared* type from upload
/// time; the merger classifies it once and skips anything unrecognized.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    /// Stable path usable against the storage collaborator.
    pub stored_path: String,
    /// User-supplied display label for the band stamped on merged pages.
    pub description: Option<String>,
    pub file_name: String,
    pub media_type: String,
}

impl AttachmentDescriptor {
    /// Display label for bands and log lines: the description, or a generic
    /// fallback when the applicant left it empty.
    pub fn label(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => "Document",
        }
    }
}

/// Declared media type, decided exactly once at classification time and
/// consumed by a single exhaustive match in the merger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Png,
    Jpeg,
    Unsupported,
}

impl MediaType {
    pub fn classify(declared: &str) -> Self {
        match declared {
            "application/pdf" => MediaType::Pdf,
            "image/png" => MediaType::Png,
            "image/jpeg" | "image/jpg" => MediaType::Jpeg,
            _ => MediaType::Unsupported,
        }
    }
}

/// Byte-retrieval capability of the storage collaborator.
///
/// Injected into the assembly call so the merger never touches a concrete
/// storage backend; tests substitute an in-memory map. Retry policy, signed
/// URLs and link expiry all live behind this seam.
pub trait AttachmentFetcher {
    fn fetch(&self, stored_path: &str) -> Result<Vec<u8>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_classification() {
        assert_eq!(MediaType::classify("application/pdf"), MediaType::Pdf);
        assert_eq!(MediaType::classify("image/png"), MediaType::Png);
        assert_eq!(MediaType::classify("image/jpeg"), MediaType::Jpeg);
        assert_eq!(MediaType::classify("image/jpg"), MediaType::Jpeg);
        assert_eq!(MediaType::classify("image/gif"), MediaType::Unsupported);
        assert_eq!(MediaType::classify(""), MediaType::Unsupported);
        assert_eq!(
            MediaType::classify("application/octet-stream"),
            MediaType::Unsupported
        );
    }

    #[test]
    fn attachment_label_falls_back() {
        let mut att = AttachmentDescriptor {
            stored_path: "a/b".into(),
            description: None,
            file_name: "scan.pdf".into(),
            media_type: "application/pdf".into(),
        };
        assert_eq!(att.label(), "Document");
        att.description = Some("   ".into());
        assert_eq!(att.label(), "Document");
        att.description = Some("Bank statement".into());
        assert_eq!(att.label(), "Bank statement");
    }
}

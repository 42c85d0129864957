//! Pure formatting helpers: WinAnsi sanitization, word wrapping, and the
//! display-label mappers for enumerated applicant fields.
//!
//! Every user-supplied string must pass through [`sanitize`] (or the byte
//! encoder [`winansi_bytes`], which applies the same substitution) before it
//! reaches a content stream: the output document uses the standard Helvetica
//! faces with WinAnsi encoding, and an unmappable character would otherwise
//! be a hard encoding failure.

use chrono::{Datelike, NaiveDate};

use crate::model::{HouseholdType, PetSpecies, PetStatus, SmokingStatus, VehicleStatus};

/// Placeholder rendered for every absent optional field.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Map a single char to its WinAnsi (CP-1252) byte, or `None` if the glyph
/// set cannot represent it.
fn to_winansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        0x0020..=0x007E => Some(c as u8),
        0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95), // bullet
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

/// Replace every character outside the WinAnsi glyph set with a placeholder.
/// `✓` becomes `*` (upload forms produce it constantly), everything else
/// unmappable becomes `?`. Total and idempotent.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2713}' => '*',
            c if to_winansi_byte(c).is_some() => c,
            _ => '?',
        })
        .collect()
}

/// Encode a string as WinAnsi bytes for a PDF string literal, applying the
/// same substitutions as [`sanitize`].
pub(crate) fn winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2713}' => b'*',
            c => to_winansi_byte(c).unwrap_or(b'?'),
        })
        .collect()
}

/// Greedy word wrap over the sanitized text. A single word longer than
/// `max_chars` is placed alone on its own line, never split mid-word.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let clean = sanitize(text);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in clean.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Cover-page income stat: `"$4,500/month"`.
pub fn format_currency_monthly(amount: u64) -> String {
    format!("${}/month", group_thousands(amount))
}

/// Profile-page income field: `"$4,500 (before taxes)"`.
pub fn format_currency_gross(amount: u64) -> String {
    format!("${} (before taxes)", group_thousands(amount))
}

/// Long human form: `"August 23, 2026"`.
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{} {}, {}", date.format("%B"), date.day(), date.year())
}

/// Whole years between `birth` and `as_of`; an anniversary not yet reached
/// decrements the naive year difference by one.
pub fn age_from_birth_date(birth: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - birth.year();
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Short household stat for the cover grid.
pub fn household_summary(household: Option<&HouseholdType>, occupants: Option<u32>) -> String {
    let Some(household) = household else {
        return NOT_SPECIFIED.to_string();
    };
    match household {
        HouseholdType::Single => "Single".to_string(),
        HouseholdType::Couple => format!("Couple ({})", occupants.unwrap_or(2)),
        HouseholdType::Family => match occupants {
            Some(n) => format!("Family ({n})"),
            None => "Family".to_string(),
        },
        HouseholdType::Roommates => match occupants {
            Some(n) => format!("{n} occupant(s)"),
            None => "Roommates".to_string(),
        },
        HouseholdType::Other(raw) => match occupants {
            Some(n) => format!("{n} occupant(s)"),
            None => sanitize(raw),
        },
    }
}

/// Full household description for the profile page.
pub fn household_detailed(
    household: Option<&HouseholdType>,
    occupants: Option<u32>,
    children: Option<u32>,
) -> String {
    let Some(household) = household else {
        return NOT_SPECIFIED.to_string();
    };
    match household {
        HouseholdType::Single => "Single (living alone)".to_string(),
        HouseholdType::Couple => "Couple (2 adults)".to_string(),
        HouseholdType::Family => match children {
            Some(n) => format!("Family (with {n} children)"),
            None => "Family (with children)".to_string(),
        },
        HouseholdType::Roommates => match occupants {
            Some(n) => format!("Roommates ({n} adults)"),
            None => "Roommates".to_string(),
        },
        HouseholdType::Other(raw) => sanitize(raw),
    }
}

pub fn smoking_label(smoking: Option<&SmokingStatus>) -> String {
    let Some(smoking) = smoking else {
        return NOT_SPECIFIED.to_string();
    };
    match smoking {
        SmokingStatus::NonSmoker => "Non-smoker".to_string(),
        SmokingStatus::Occasional => "Occasional smoker (outside only)".to_string(),
        SmokingStatus::Smoker => "Smoker".to_string(),
        SmokingStatus::Other(raw) => sanitize(raw),
    }
}

/// Short pet stat for the cover grid.
pub fn pet_summary(pets: Option<&PetStatus>) -> String {
    match pets {
        None => NOT_SPECIFIED.to_string(),
        Some(PetStatus::NoPets) => "No pets".to_string(),
        Some(PetStatus::Owned(info)) => format!("{} pet(s)", info.count.unwrap_or(1)),
    }
}

/// Full pet description for the profile page. When both dog and cat details
/// are present, the dog details win; the upstream product has only ever
/// surfaced one species here.
pub fn pet_detailed(pets: Option<&PetStatus>) -> String {
    let Some(pets) = pets else {
        return NOT_SPECIFIED.to_string();
    };
    let info = match pets {
        PetStatus::NoPets => return "No pets".to_string(),
        PetStatus::Owned(info) => info,
    };
    let count = info.count.unwrap_or(1);
    let has = |species: &PetSpecies| info.species.contains(species);

    if has(&PetSpecies::Dog) {
        match &info.dog_details {
            Some(details) => format!("{count} dog(s) ({})", sanitize(details)),
            None => format!("{count} dog(s)"),
        }
    } else if has(&PetSpecies::Cat) {
        match &info.cat_details {
            Some(details) => format!("{count} cat(s) ({})", sanitize(details)),
            None => format!("{count} cat(s)"),
        }
    } else {
        format!("{count} pet(s)")
    }
}

/// Short vehicle stat for the cover grid.
pub fn vehicle_summary(vehicle: Option<&VehicleStatus>) -> String {
    match vehicle {
        None => NOT_SPECIFIED.to_string(),
        Some(VehicleStatus::NoVehicle) => "No vehicle".to_string(),
        Some(VehicleStatus::Owned { parking_spaces }) => {
            format!("Yes ({} parking)", parking_spaces.unwrap_or(1))
        }
    }
}

/// Full vehicle description for the profile page.
pub fn vehicle_detailed(vehicle: Option<&VehicleStatus>) -> String {
    match vehicle {
        None => NOT_SPECIFIED.to_string(),
        Some(VehicleStatus::NoVehicle) => "No vehicle".to_string(),
        Some(VehicleStatus::Owned { parking_spaces }) => {
            format!("Yes ({} parking space needed)", parking_spaces.unwrap_or(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pets;

    #[test]
    fn sanitize_is_total_and_idempotent() {
        let inputs = [
            "plain ascii",
            "Müller-Lüdenscheidt",
            "checkmark ✓ done",
            "emoji 🏠 and CJK 家 and ₹",
            "curly “quotes” – dash — …",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
            assert!(once.chars().all(|c| to_winansi_byte(c).is_some()));
        }
        assert_eq!(sanitize("✓ verified"), "* verified");
        assert_eq!(sanitize("家 ok"), "? ok");
    }

    #[test]
    fn winansi_bytes_substitutes_unmappable() {
        assert_eq!(winansi_bytes("A✓家"), vec![b'A', b'*', b'?']);
        assert_eq!(winansi_bytes("€"), vec![0x80]);
    }

    #[test]
    fn wrap_respects_line_limit() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        for line in &lines {
            assert!(line.chars().count() <= 10, "line too long: {line:?}");
        }
        assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn wrap_places_long_word_alone() {
        let lines = wrap("ok supercalifragilisticexpialidocious ok", 10);
        assert_eq!(
            lines,
            vec!["ok", "supercalifragilisticexpialidocious", "ok"]
        );
    }

    #[test]
    fn wrap_normalizes_whitespace_on_reconstruction() {
        let lines = wrap("  spaced   out\ttext\nhere  ", 12);
        assert_eq!(lines.join(" "), "spaced out text here");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency_monthly(4500), "$4,500/month");
        assert_eq!(format_currency_monthly(900), "$900/month");
        assert_eq!(format_currency_gross(1234567), "$1,234,567 (before taxes)");
    }

    #[test]
    fn long_date_form() {
        let d = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        assert_eq!(format_long_date(d), "August 3, 2026");
    }

    #[test]
    fn age_decrements_before_anniversary() {
        let birth = NaiveDate::from_ymd_opt(2000, 8, 24).unwrap();
        let as_of = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        // One day before the birthday: naive difference minus one.
        assert_eq!(age_from_birth_date(birth, as_of), 25);
        let on_birthday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert_eq!(age_from_birth_date(birth, on_birthday), 26);
    }

    #[test]
    fn household_labels() {
        assert_eq!(household_summary(None, None), NOT_SPECIFIED);
        assert_eq!(
            household_summary(Some(&HouseholdType::Couple), None),
            "Couple (2)"
        );
        assert_eq!(
            household_summary(Some(&HouseholdType::Family), Some(4)),
            "Family (4)"
        );
        assert_eq!(
            household_detailed(Some(&HouseholdType::Single), None, None),
            "Single (living alone)"
        );
        assert_eq!(
            household_detailed(Some(&HouseholdType::Roommates), Some(3), None),
            "Roommates (3 adults)"
        );
        assert_eq!(
            household_detailed(Some(&HouseholdType::Other("commune".into())), None, None),
            "commune"
        );
    }

    #[test]
    fn pet_details_prefer_dog_over_cat() {
        let both = PetStatus::Owned(Pets {
            species: vec![PetSpecies::Dog, PetSpecies::Cat],
            count: Some(2),
            dog_details: Some("small terrier".into()),
            cat_details: Some("indoor cat".into()),
        });
        assert_eq!(pet_detailed(Some(&both)), "2 dog(s) (small terrier)");

        let cat_only = PetStatus::Owned(Pets {
            species: vec![PetSpecies::Cat],
            count: None,
            dog_details: None,
            cat_details: None,
        });
        assert_eq!(pet_detailed(Some(&cat_only)), "1 cat(s)");
        assert_eq!(pet_detailed(Some(&PetStatus::NoPets)), "No pets");
        assert_eq!(pet_detailed(None), NOT_SPECIFIED);
    }

    #[test]
    fn vehicle_labels() {
        assert_eq!(vehicle_summary(None), NOT_SPECIFIED);
        assert_eq!(vehicle_summary(Some(&VehicleStatus::NoVehicle)), "No vehicle");
        assert_eq!(
            vehicle_summary(Some(&VehicleStatus::Owned {
                parking_spaces: Some(2)
            })),
            "Yes (2 parking)"
        );
        assert_eq!(
            vehicle_detailed(Some(&VehicleStatus::Owned {
                parking_spaces: None
            })),
            "Yes (1 parking space needed)"
        );
    }
}

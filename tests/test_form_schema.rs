//! Integration tests for masking, CPF checks and the form schema working together.

use collaborator_form::domain::{check_digits, is_valid_cpf};
use collaborator_form::format::{format_cpf, format_phone, strip_digits, FieldMask};
use collaborator_form::models::FormValues;
use collaborator_form::validation::{
    into_new_collaborator, validate_field, validate_form, FormField, ADDRESS_TOO_SHORT,
    CPF_INCOMPLETE, CPF_INVALID, INVALID_FORMAT, NAME_TOO_LONG, NAME_TOO_SHORT,
    PHONE_INCOMPLETE, REQUIRED_LABEL,
};

/// Deterministic spread of nine-digit bases.
fn bases() -> impl Iterator<Item = [u8; 9]> {
    (0..500u64).map(|i| {
        let mut n = i.wrapping_mul(2_654_435_761) % 1_000_000_000;
        let mut base = [0u8; 9];
        for slot in base.iter_mut().rev() {
            *slot = (n % 10) as u8;
            n /= 10;
        }
        base
    })
}

fn complete(base: [u8; 9]) -> String {
    let (d1, d2) = check_digits(&base);
    base.iter()
        .chain([d1, d2].iter())
        .map(|d| char::from(b'0' + d))
        .collect()
}

fn valid_values() -> FormValues {
    FormValues {
        name: "Ana Silva".to_string(),
        email: "ana@ex.com".to_string(),
        cpf: "529.982.247-25".to_string(),
        phone: "(11) 9 8765-4321".to_string(),
        address: "Rua Teste 123".to_string(),
    }
}

#[test]
fn test_generated_cpfs_validate_masked_and_raw() {
    for base in bases() {
        let cpf = complete(base);
        assert!(is_valid_cpf(&cpf), "{} should be valid", cpf);
        assert!(is_valid_cpf(&format_cpf(&cpf)), "{} masked should be valid", cpf);
        assert!(validate_field(FormField::Cpf, &format_cpf(&cpf)).is_valid());
    }
}

#[test]
fn test_changing_a_check_digit_invalidates() {
    for base in bases() {
        let cpf = complete(base);
        let mut digits: Vec<u8> = cpf.bytes().collect();
        digits[10] = if digits[10] == b'9' { b'0' } else { digits[10] + 1 };
        let mutated = String::from_utf8(digits).unwrap();
        assert!(!is_valid_cpf(&mutated), "{} should be invalid", mutated);
    }
}

#[test]
fn test_known_cpfs() {
    assert!(is_valid_cpf("529.982.247-25"));
    assert!(is_valid_cpf("52998224725"));
    assert!(!is_valid_cpf("529.982.247-26"));
    assert!(is_valid_cpf("012.345.678-90"));
    assert_eq!(check_digits(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), (2, 5));
}

#[test]
fn test_masks_are_idempotent_for_every_prefix() {
    let cpf = "52998224725";
    let phone = "11987654321";
    for len in 0..=cpf.len() {
        let once = format_cpf(&cpf[..len]);
        assert_eq!(format_cpf(&once), once);
        assert_eq!(strip_digits(&once), &cpf[..len]);
    }
    for len in 0..=phone.len() {
        let once = format_phone(&phone[..len]);
        assert_eq!(format_phone(&once), once);
        assert_eq!(strip_digits(&once), &phone[..len]);
    }
}

#[test]
fn test_progressive_phone_typing() {
    assert_eq!(FieldMask::Phone.apply("1"), "(1");
    assert_eq!(FieldMask::Phone.apply("11"), "(11)");
    assert_eq!(FieldMask::Phone.apply("119"), "(11) 9");
    assert_eq!(FieldMask::Phone.apply("11987654"), "(11) 9 8765-4");
    assert_eq!(FieldMask::Phone.apply("119876543219999"), "(11) 9 8765-4321");
}

#[test]
fn test_valid_form_builds_numeric_record() {
    let record = into_new_collaborator(&valid_values()).unwrap();
    let wire = serde_json::to_value(&record).unwrap();

    assert_eq!(wire["cpf"], 52998224725u64);
    assert_eq!(wire["fone"], 11987654321u64);
    assert_eq!(wire["nome"], "Ana Silva");
}

#[test]
fn test_empty_form_reports_every_field() {
    let report = validate_form(&FormValues::default());

    assert!(!report.is_valid());
    assert_eq!(report.errors().count(), 5);
    for field in FormField::ALL {
        assert_eq!(report.error(field), Some(REQUIRED_LABEL), "{}", field);
    }
}

#[test]
fn test_field_messages() {
    let check = |field, value: &str, expected: Option<&str>| {
        let mut values = valid_values();
        *field_mut(&mut values, field) = value.to_string();
        let report = validate_form(&values);
        assert_eq!(report.error(field), expected, "{} = {:?}", field, value);
        assert_eq!(report.errors().count(), usize::from(expected.is_some()));
    };

    check(FormField::Name, "Al", Some(NAME_TOO_SHORT));
    check(FormField::Name, "Ana", None);
    check(FormField::Name, &"a".repeat(60), None);
    check(FormField::Name, &"a".repeat(61), Some(NAME_TOO_LONG));
    check(FormField::Email, "not-an-email", Some(INVALID_FORMAT));
    check(FormField::Cpf, "529.982.247", Some(CPF_INCOMPLETE));
    check(FormField::Cpf, "529.982.247-26", Some(CPF_INVALID));
    check(FormField::Phone, "(11) 9 8765", Some(PHONE_INCOMPLETE));
    check(FormField::Address, "Rua Tes 1", Some(ADDRESS_TOO_SHORT));
    check(FormField::Address, "Rua Test 1", None);
}

fn field_mut(values: &mut FormValues, field: FormField) -> &mut String {
    field.value_in_mut(values)
}

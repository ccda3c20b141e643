use super::*;

#[test]
fn test_compact_identifier() {
    let id = SampleIdentifier::parse("64Dt7.5");

    assert_eq!(id.time, Some(7.5));
    assert_eq!(id.sample_number.as_deref(), Some("64"));
    assert_eq!(id.group, Some(Group::D));
    assert_eq!(id.sample_combo.as_deref(), Some("64D"));
    assert_eq!(id.sample_type, None);
}

#[test]
fn test_full_identifier() {
    let id = SampleIdentifier::parse("Disk 60A t14");

    assert_eq!(id.time, Some(14.0));
    assert_eq!(id.sample_type, Some(SampleType::Disk));
    assert_eq!(id.sample_number.as_deref(), Some("60"));
    assert_eq!(id.group, Some(Group::A));
    assert_eq!(id.sample_combo.as_deref(), Some("60A"));
}

#[test]
fn test_only_ascii_digits_count() {
    let id = SampleIdentifier::parse("\u{666}\u{664}Dt7");
    assert_eq!(id.time, Some(7.0));
    assert_eq!(id.sample_number, None);
    assert_eq!(id.group, None);

    // a non-ASCII digit after `t` does not hide a later time token
    assert_eq!(extract_time("64Dt\u{663} t7"), Some(7.0));
    assert_eq!(extract_sample_group("\u{666}4D 64D"), Some(("64".to_string(), Group::D)));
}

#[test]
fn test_sample_type_is_case_insensitive() {
    assert_eq!(extract_sample_type("DUST_63B t0"), Some(SampleType::Dust));
    assert_eq!(extract_sample_type("63b-disk"), Some(SampleType::Disk));
    // disk is checked first
    assert_eq!(extract_sample_type("disk dust"), Some(SampleType::Disk));
    assert_eq!(extract_sample_type("63B t0"), None);
}

#[test]
fn test_time_variants() {
    assert_eq!(extract_time("67Ct0"), Some(0.0));
    assert_eq!(extract_time("67Ct21."), Some(21.0));
    assert_eq!(extract_time("67C t3.25 rep2"), Some(3.25));
    assert_eq!(extract_time("67C T3"), None);
    assert_eq!(extract_time("67C"), None);
}

#[test]
fn test_first_time_token_wins() {
    assert_eq!(extract_time("60At7t14"), Some(7.0));
}

#[test]
fn test_sample_group_requires_known_letter() {
    assert_eq!(extract_sample_group("64E t7"), None);
    assert_eq!(extract_sample_group("6A t7"), None);
    assert_eq!(extract_sample_group("64a t7"), None);
    assert_eq!(
        extract_sample_group("x164Bt7"),
        Some(("64".to_string(), Group::B))
    );
}

#[test]
fn test_partial_parse_never_fails() {
    let id = SampleIdentifier::parse("standard 10ppm");

    assert_eq!(id.raw, "standard 10ppm");
    assert_eq!(id.time, None);
    assert_eq!(id.sample_type, None);
    assert_eq!(id.sample_number, None);
    assert_eq!(id.group, None);
    assert_eq!(id.sample_combo, None);
    assert_eq!(id.shale_id("-BIS"), None);
}

#[test]
fn test_shale_id_suffix() {
    let id = SampleIdentifier::parse("12Bt3");
    assert_eq!(id.shale_id("").as_deref(), Some("12"));
    assert_eq!(id.shale_id("-BIS").as_deref(), Some("12-BIS"));
}

#[test]
fn test_identical_identifiers_parse_identically() {
    let a = SampleIdentifier::parse("Dust 63C t2.5");
    let b = SampleIdentifier::parse("Dust 63C t2.5");
    assert_eq!(a, b);
}

#[test]
fn test_blank_detection() {
    assert!(is_blank("Blank"));
    assert!(is_blank("method BLANK 2"));
    assert!(!is_blank("64Dt7.5"));
}

#[test]
fn test_group_from_code() {
    assert_eq!(Group::from_code("A"), Group::A);
    assert_eq!(Group::from_code(" D "), Group::D);
    assert_eq!(Group::from_code("E"), Group::Unknown);
    assert_eq!(Group::from_code("AB"), Group::Unknown);
    assert_eq!(Group::from_code(""), Group::Unknown);
}

#[test]
fn test_sample_type_labels() {
    assert_eq!(SampleType::from_label("disk"), SampleType::Disk);
    assert_eq!(SampleType::from_label(""), SampleType::Unknown);
    assert_eq!("Dust".parse::<SampleType>().unwrap(), SampleType::Dust);
    assert!("rock".parse::<SampleType>().is_err());
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any well-formed identifier yields all four fields
        #[test]
        fn test_well_formed_identifiers(
            number in 10u32..100,
            letter in prop::sample::select(vec!['A', 'B', 'C', 'D']),
            days in 0u32..400,
            tenths in 0u32..10,
            kind in prop::sample::select(vec!["Disk", "dust"]),
        ) {
            let raw = format!("{} {}{} t{}.{}", kind, number, letter, days, tenths);
            let id = SampleIdentifier::parse(&raw);

            let expected_time: f64 = format!("{}.{}", days, tenths).parse().unwrap();
            prop_assert_eq!(id.time, Some(expected_time));
            prop_assert_eq!(id.sample_number, Some(number.to_string()));
            prop_assert_eq!(id.group, Some(Group::from_letter(letter)));
            prop_assert!(id.sample_type.is_some());
        }

        /// Parsing arbitrary text never panics
        #[test]
        fn test_arbitrary_text(raw in ".*") {
            let id = SampleIdentifier::parse(&raw);
            prop_assert_eq!(id.group.is_some(), id.sample_number.is_some());
        }
    }
}

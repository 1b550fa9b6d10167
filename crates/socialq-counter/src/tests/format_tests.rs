use super::*;

#[test]
fn groups_by_thousands() {
    let format = NumberFormat::en_us();
    assert_eq!(format.format(0), "0");
    assert_eq!(format.format(999), "999");
    assert_eq!(format.format(1_000), "1,000");
    assert_eq!(format.format(123_456), "123,456");
    assert_eq!(format.format(29_171_793), "29,171,793");
}

#[test]
fn negative_values_keep_sign_outside_groups() {
    let format = NumberFormat::en_us();
    assert_eq!(format.format(-1), "-1");
    assert_eq!(format.format(-1_234_567), "-1,234,567");
    assert_eq!(format.format(i64::MIN), "-9,223,372,036,854,775,808");
}

#[test]
fn locale_separators() {
    assert_eq!(NumberFormat::de_de().format(29_171_793), "29.171.793");

    let french = NumberFormat::fr_fr();
    assert_ne!(french.group_separator(), ",");
    assert_eq!(
        french.format(1_500),
        format!("1{}500", french.group_separator())
    );

    let swiss = NumberFormat::de_ch();
    assert_eq!(swiss.group_separator(), Locale::de_CH.separator());
    assert_eq!(swiss.format(1_500), format!("1{}500", swiss.group_separator()));
}

#[test]
fn locale_lookup() {
    assert_eq!(NumberFormat::for_locale("en-US").format(1_500), "1,500");
    assert_eq!(NumberFormat::for_locale("de_DE").format(29_171_793), "29.171.793");
    assert_eq!(NumberFormat::for_locale("de-ch"), NumberFormat::de_ch());
    assert_eq!(NumberFormat::for_locale("fr"), NumberFormat::fr_fr());
}

#[test]
fn unknown_locales_fall_back_to_en_us() {
    for tag in ["tlh", "", "  ", "xx-YY"] {
        assert_eq!(NumberFormat::for_locale(tag).locale(), DEFAULT_LOCALE, "{tag:?}");
    }
    assert_eq!(canonical_tag(" de_ch "), "de-CH");
}

#[test]
fn parse_reads_formatted_text() {
    let format = NumberFormat::en_us();
    assert_eq!(format.parse("29,171,793"), Some(29_171_793));
    assert_eq!(format.parse(" 42 "), Some(42));
    assert_eq!(format.parse("-1,000"), Some(-1_000));
    assert_eq!(format.parse("-9,223,372,036,854,775,808"), Some(i64::MIN));
}

#[test]
fn parse_rejects_garbage() {
    let format = NumberFormat::en_us();
    assert_eq!(format.parse(""), None);
    assert_eq!(format.parse(","), None);
    assert_eq!(format.parse("12a"), None);
    assert_eq!(format.parse("9,223,372,036,854,775,808"), None);
    assert_eq!(format.parse("Loading…"), None);
}

#[test]
fn formatting_is_idempotent_through_parse() {
    let samples = [
        0,
        7,
        1_000,
        999_999,
        29_171_793,
        27_348_555,
        i64::MAX,
    ];
    for format in [
        NumberFormat::en_us(),
        NumberFormat::de_de(),
        NumberFormat::fr_fr(),
        NumberFormat::de_ch(),
    ] {
        for n in samples {
            let shown = format.format(n);
            let reparsed = format.parse(&shown).expect("formatted text parses");
            assert_eq!(format.format(reparsed), shown);
        }
    }
}

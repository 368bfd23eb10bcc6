use icu_casemap::CaseMapper;

// ========================================================================= //

/// Returns true if two directory entry names are equal ignoring case.
///
/// Directory names are compared after simple (one-to-one) uppercasing of
/// each character, which is how compound files order their entries.
pub fn names_match(name1: &str, name2: &str) -> bool {
    if name1.is_ascii() && name2.is_ascii() {
        return name1.eq_ignore_ascii_case(name2);
    }
    if name1.encode_utf16().count() != name2.encode_utf16().count() {
        return false;
    }
    let mapper = CaseMapper::new();
    name1
        .chars()
        .map(|chr| mapper.simple_uppercase(chr))
        .eq(name2.chars().map(|chr| mapper.simple_uppercase(chr)))
}

// ========================================================================= //


// ========================================================================= //

//! Text normalization for names and titles.
//!
//! Folder and file names arrive from different filesystems in different
//! Unicode forms and with ad-hoc punctuation. Every textual field of a
//! [`MetadataRecord`](crate::MetadataRecord) passes through one of the
//! functions here before it is stored.
//!
//! All functions are idempotent: applying them to their own output is a no-op.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// At least one space after a comma, followed by the next visible character.
static COMMA_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*(\S)").expect("valid comma regex"));

/// `op`, `Op.`, `OP 12`, `op12`, `Op posth.` as a whole word.
///
/// `op` must be followed by a dot, whitespace or a digit, so words like
/// "Operas" are left alone.
static OPUS_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bop(?:\.\s*|\s+|(?P<digit>\d))").expect("valid opus regex")
});

/// `No5`, `no. 5`, `NR 12`, `Nr.12` at a word start.
static NUMBER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:no|nr)\.?\s*(?P<digits>\d+)").expect("valid number regex")
});

/// `d'` / `o'` prefixes at the start of a title-cased word.
static APOSTROPHE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([DdOo])'(\p{L})").expect("valid apostrophe regex"));

/// Convert to Unicode canonical composed form (NFC).
pub fn nfc(s: &str) -> String {
    s.nfc().collect()
}

/// Normalize a person name (composer).
///
/// # Examples
///
/// ```
/// use tonarchiv_parser::normalize::normalize_name;
///
/// assert_eq!(normalize_name("Bach,Johann_Sebastian"), "Bach, Johann Sebastian");
/// ```
pub fn normalize_name(s: &str) -> String {
    let s = nfc(s).replace('_', " ");
    let s = COMMA_SPACING.replace_all(&s, ", $1");
    s.trim().to_string()
}

/// Normalize a person name and title-case it when it is written entirely in
/// upper case.
///
/// ```
/// use tonarchiv_parser::normalize::normalize_display_name;
///
/// assert_eq!(normalize_display_name("BACH,JOHANN"), "Bach, Johann");
/// assert_eq!(normalize_display_name("Bach, Johann"), "Bach, Johann");
/// ```
pub fn normalize_display_name(s: &str) -> String {
    smart_titlecase(&normalize_name(s))
}

/// Normalize a title (album, work, disc, box or track title).
///
/// # Examples
///
/// ```
/// use tonarchiv_parser::normalize::normalize_text;
///
/// assert_eq!(normalize_text("Sonate_Op.27_No2"), "Sonate op. 27 Nr. 2");
/// assert_eq!(normalize_text("Adagio--Allegro"), "Adagio—Allegro");
/// ```
pub fn normalize_text(s: &str) -> String {
    let s = nfc(s).replace('_', " ").replace("--", "—");
    let s = OPUS_MARKER.replace_all(&s, "op. ${digit}");
    let s = s.replace("Nº", "No");
    let s = NUMBER_MARKER.replace_all(&s, "Nr. ${digits}");
    s.trim().to_string()
}

/// Title-case a string that is written entirely in upper case.
///
/// Strings containing any lower-case letter (or no letters at all) are
/// returned unchanged. Whitespace runs collapse to single spaces.
pub fn smart_titlecase(s: &str) -> String {
    if !is_all_upper(s) {
        return s.to_string();
    }

    s.split_whitespace()
        .map(titlecase_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_all_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

fn titlecase_word(word: &str) -> String {
    if word.contains('-') {
        return word
            .split('-')
            .map(titlecase_word)
            .collect::<Vec<_>>()
            .join("-");
    }
    if word.contains('+') {
        return word
            .split('+')
            .map(titlecase_word)
            .collect::<Vec<_>>()
            .join("+");
    }

    let w = capitalize(word);
    APOSTROPHE_PREFIX
        .replace(&w, |caps: &regex::Captures| {
            let prefix = match &caps[1] {
                "d" | "D" => "d",
                _ => "O",
            };
            format!("{}'{}", prefix, caps[2].to_uppercase())
        })
        .into_owned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfc_composes_decomposed_umlauts() {
        let decomposed = "Mu\u{0308}ller";
        assert_eq!(nfc(decomposed), "Müller");
        assert_eq!(nfc(""), "");
    }

    #[test]
    fn test_normalize_name_spacing() {
        assert_eq!(normalize_name("Bach,Johann"), "Bach, Johann");
        assert_eq!(normalize_name("Bach,   Johann"), "Bach, Johann");
        assert_eq!(normalize_name("Bach, Johann"), "Bach, Johann");
        assert_eq!(normalize_name("Mozart_Wolfgang"), "Mozart Wolfgang");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_normalize_text_opus() {
        assert_eq!(normalize_text("op12"), "op. 12");
        assert_eq!(normalize_text("Op. 12"), "op. 12");
        assert_eq!(normalize_text("OP 12"), "op. 12");
        assert_eq!(normalize_text("Op.12"), "op. 12");
        assert_eq!(normalize_text("Sonate Op. 27"), "Sonate op. 27");
        assert_eq!(normalize_text("OP  12"), "op. 12");
        assert_eq!(normalize_text("Op posth."), "op. posth.");
        assert_eq!(normalize_text("Mazurka op posth"), "Mazurka op. posth");
        assert_eq!(normalize_text("Sinfonie Nr 5 Op 67"), "Sinfonie Nr. 5 op. 67");
    }

    #[test]
    fn test_normalize_text_keeps_words_starting_with_op() {
        assert_eq!(normalize_text("Operas"), "Operas");
        assert_eq!(normalize_text("Great Operas"), "Great Operas");
        assert_eq!(normalize_text("Opening"), "Opening");
        assert_eq!(normalize_text("Top 5"), "Top 5");
    }

    #[test]
    fn test_normalize_text_numbers() {
        assert_eq!(normalize_text("No5"), "Nr. 5");
        assert_eq!(normalize_text("nr. 5"), "Nr. 5");
        assert_eq!(normalize_text("NO. 12"), "Nr. 12");
        assert_eq!(normalize_text("Nº 3"), "Nr. 3");
        assert_eq!(normalize_text("Symphony No 9 op 125"), "Symphony Nr. 9 op. 125");
        assert_eq!(normalize_text("Nocturne 2"), "Nocturne 2");
        assert_eq!(normalize_text("Piano 5"), "Piano 5");
    }

    #[test]
    fn test_normalize_text_punctuation() {
        assert_eq!(normalize_text("Kyrie_eleison"), "Kyrie eleison");
        assert_eq!(normalize_text("Allegro--Presto"), "Allegro—Presto");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let samples = [
            "Sonate_Op.27_No2",
            "op12",
            "OP 12 No5",
            "Adagio---Allegro",
            "Nº3 -- Finale",
            "Bach,Johann",
            " Verdi_ ,Giuseppe ",
            "Mu\u{0308}ller",
            "",
            "Great Operas",
            "Op posth.",
            "Mazurka op posth",
            "Sonate op",
            "Opening",
            "Top 5",
        ];

        for s in samples {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once, "normalize_text({s:?})");

            let once = normalize_name(s);
            assert_eq!(normalize_name(&once), once, "normalize_name({s:?})");

            let once = normalize_display_name(s);
            assert_eq!(
                normalize_display_name(&once),
                once,
                "normalize_display_name({s:?})"
            );
        }
    }

    #[test]
    fn test_smart_titlecase() {
        assert_eq!(smart_titlecase("JOHANN SEBASTIAN BACH"), "Johann Sebastian Bach");
        assert_eq!(smart_titlecase("LIVE-KONZERT"), "Live-Konzert");
        assert_eq!(smart_titlecase("BACH+VIVALDI"), "Bach+Vivaldi");
        assert_eq!(smart_titlecase("JEANNE D'ARC"), "Jeanne d'Arc");
        assert_eq!(smart_titlecase("O'NEILL"), "O'Neill");
        assert_eq!(smart_titlecase("Already Mixed"), "Already Mixed");
        assert_eq!(smart_titlecase("1234"), "1234");
        assert_eq!(smart_titlecase(""), "");
    }
}

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_PATTERN: Regex = Regex::new(r"https?://\S+|www\.\S+").unwrap();
    static ref TAG_PATTERN: Regex = Regex::new(r"<.*?>").unwrap();
    static ref NON_WORD_PATTERN: Regex = Regex::new(r"[^\w\s]").unwrap();
    static ref DIGIT_PATTERN: Regex = Regex::new(r"\d").unwrap();
}

/// Canonical form fed to the classifier. Must match the cleaning applied at
/// training time, so the order of the steps is fixed.
pub fn normalize(text: &str) -> String {
    let text = text.to_lowercase();
    let text = URL_PATTERN.replace_all(&text, "");
    let text = TAG_PATTERN.replace_all(&text, "");
    let text = NON_WORD_PATTERN.replace_all(&text, "");
    let text = DIGIT_PATTERN.replace_all(&text, "");
    text.replace('\n', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_url_punctuation_and_digits() {
        assert_eq!(normalize("Check http://x.com NOW!! 123"), "check  now");
    }

    #[test]
    fn strips_www_links_and_tags() {
        assert_eq!(
            normalize("<p>Read more</p> at www.example.org/story today"),
            "read more at  today"
        );
    }

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(normalize("  First line\nSecond line\n"), "first line second line");
    }

    #[test]
    fn keeps_underscores_and_unicode_letters() {
        assert_eq!(normalize("Ünïcode_words, ok?"), "ünïcode_words ok");
    }

    #[test]
    fn empty_and_symbol_only_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!! 42 ???"), "");
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap());

/// Make a name safe for use in a file name.
///
/// Whitespace runs become a single underscore, then anything outside
/// `[A-Za-z0-9_-]` is dropped.
pub fn sanitize_file_name(name: &str) -> String {
    let underscored = WHITESPACE.replace_all(name, "_");
    DISALLOWED.replace_all(&underscored, "").into_owned()
}

/// Suggested export title, `Invoice_<client>`
pub fn document_title(client_name: &str) -> String {
    format!("Invoice_{}", sanitize_file_name(client_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_strips_punctuation() {
        assert_eq!(sanitize_file_name("John  O'Brien!!"), "John_OBrien");
        assert_eq!(sanitize_file_name("Acme\t\nCorp"), "Acme_Corp");
        assert_eq!(sanitize_file_name("  lead"), "_lead");
        assert_eq!(sanitize_file_name("a-b_c"), "a-b_c");
    }

    #[test]
    fn drops_non_ascii_letters() {
        assert_eq!(sanitize_file_name("Zoë Ñúñez"), "Zo_ez");
        assert_eq!(sanitize_file_name("!!!"), "");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "John  O'Brien!!",
            "  spaced  out  ",
            "tabs\tand\nnewlines",
            "Zoë Ñúñez & Co.",
            "a - b",
            "",
        ];
        for input in inputs {
            let once = sanitize_file_name(input);
            assert_eq!(sanitize_file_name(&once), once, "input: {input:?}");
            assert!(once
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        }
    }

    #[test]
    fn title_prefixes_invoice() {
        assert_eq!(document_title("John  O'Brien!!"), "Invoice_John_OBrien");
        assert_eq!(document_title(""), "Invoice_");
    }
}

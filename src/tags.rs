use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// What may follow a suffix: a year/edition number or an `_<digits>` date.
#[derive(Debug, Clone, Copy)]
enum Trailer {
    Digits,
    UnderscoreDigits,
}

// Most specific first: shorter suffixes are substrings of longer ones.
const SUFFIXES: &[(&str, Trailer)] = &[
    ("生誕祭", Trailer::Digits),
    ("誕生祭", Trailer::Digits),
    ("版もうひとつの深夜の真剣お絵描き60分一本勝負", Trailer::UnderscoreDigits),
    ("版深夜の真剣お絵描き60分一本勝負", Trailer::UnderscoreDigits),
    ("深夜の真剣お絵描き60分一本勝負", Trailer::UnderscoreDigits),
    ("深夜の真剣お絵かき60分一本勝負", Trailer::UnderscoreDigits),
    ("版深夜のお絵描き60分一本勝負", Trailer::UnderscoreDigits),
    ("深夜のお絵描き60分一本勝負", Trailer::UnderscoreDigits),
    ("版真剣お絵描き60分一本勝負", Trailer::UnderscoreDigits),
    ("版真剣お絵描き60分一本勝", Trailer::UnderscoreDigits),
    ("版お絵描き60分一本勝負", Trailer::UnderscoreDigits),
    ("お絵描き60分一本勝負", Trailer::UnderscoreDigits),
];

struct SuffixRule {
    pattern: Regex,
}

impl SuffixRule {
    fn new(suffix: &str, trailer: Trailer) -> Self {
        let trailer = match trailer {
            Trailer::Digits => r"\d*",
            Trailer::UnderscoreDigits => r"(?:_\d+)?",
        };
        // `.+` keeps at least one character in front of the suffix; `strip`
        // also rejects a whitespace-only prefix.
        let pattern = Regex::new(&format!("^(.+){}{}$", regex::escape(suffix), trailer)).unwrap();
        SuffixRule { pattern }
    }

    fn strip<'a>(&self, tag: &'a str) -> Option<&'a str> {
        let base = self.pattern.captures(tag)?.get(1)?.as_str();
        (!base.trim().is_empty()).then_some(base)
    }
}

static RULES: LazyLock<Vec<SuffixRule>> = LazyLock::new(|| {
    SUFFIXES
        .iter()
        .map(|&(suffix, trailer)| SuffixRule::new(suffix, trailer))
        .collect()
});

pub fn normalize_tag(tag: &str) -> String {
    for rule in RULES.iter() {
        if let Some(base) = rule.strip(tag) {
            tracing::trace!(tag, base, "stripped tag suffix");
            return base.to_string();
        }
    }
    tag.to_string()
}

/// Normalizes every tag, dropping repeats while keeping first-seen order.
pub fn normalize_tags<'a, I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let normalized = normalize_tag(tag);
        if seen.insert(normalized.clone()) {
            out.push(normalized);
        }
    }
    out
}

//! Turns a spoken Vietnamese transcript into a transaction draft.
//!
//! The parser is a table-driven heuristic, not a numeral grammar: number
//! words are swapped for digits one at a time, every numeral (with its
//! magnitude suffixes) becomes a candidate amount, and the largest candidate
//! wins. It never fails; unparseable input yields `amount: None`.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::VoiceTransactionData;

const NUMBER_WORDS: &[(&str, u64)] = &[
    ("không", 0),
    ("linh", 0),
    ("một", 1),
    ("mốt", 1),
    ("môt", 1),
    ("hai", 2),
    ("ba", 3),
    ("bốn", 4),
    ("tư", 4),
    ("năm", 5),
    ("lăm", 5),
    ("nhăm", 5),
    ("sáu", 6),
    ("bảy", 7),
    ("bẩy", 7),
    ("tám", 8),
    ("chín", 9),
    ("mười", 10),
    ("trăm", 100),
    ("ngàn", 1_000),
    ("nghìn", 1_000),
    ("triệu", 1_000_000),
    ("tỷ", 1_000_000_000),
];

// Longer tokens first so that `triệu` wins over `tr`.
const MULTIPLIERS: &[(&str, f64)] = &[
    ("triệu", 1_000_000.0),
    ("nghìn", 1_000.0),
    ("ngàn", 1_000.0),
    ("trăm", 100.0),
    ("tỷ", 1_000_000_000.0),
    ("tr", 1_000_000.0),
    ("k", 1_000.0),
];

pub const INCOME_KEYWORDS: &[&str] = &[
    "thu", "thu nhập", "nhận", "lương", "thưởng", "được", "kiếm", "bán",
];

pub const EXPENSE_KEYWORDS: &[&str] = &["chi", "chi tiêu", "trả", "mua", "tiêu", "tốn", "phí"];

// Spoken or written currency after an amount belongs to the amount.
const CURRENCY_WORDS: &[&str] = &["vnđ", "vnd", "đồng", "đ"];

/// Amounts above this are treated as misheard input.
const MAX_AMOUNT: f64 = 1e15;

const CONNECTORS: &[&str] = &["cho", "về", "của", "là", "với", "để", "bằng"];

const EXAMPLES: &[&str] = &[
    "Chi 50000 đồng ăn sáng",
    "Chi 35k mua cafe",
    "Mua xăng 200 ngàn",
    "Thu nhập 5 triệu lương tháng",
    "Nhận 500k thưởng",
    "Tiêu 2 triệu mua đồ",
];

/// Regex alternation of literal words; inner spaces match any whitespace run.
fn alternation<'a>(words: impl Iterator<Item = &'a str>) -> String {
    words
        .map(|w| regex::escape(w).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|")
}

static NUMBER_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut words: Vec<&str> = NUMBER_WORDS.iter().map(|(w, _)| *w).collect();
    words.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));
    Regex::new(&format!(r"\b(?:{})\b", alternation(words.into_iter()))).expect("number word pattern")
});

// A numeral, its magnitude suffixes, then optionally a suffix glued to a
// trailing digit group ("2tr5", "35k5") and a currency word.
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    let suffixes = alternation(MULTIPLIERS.iter().map(|(w, _)| *w));
    let currency = alternation(CURRENCY_WORDS.iter().copied());
    Regex::new(&format!(
        r"(?P<num>\d+(?:[.,]\d+)*)(?P<suffix>(?:\s*(?:{suffixes})\b)*)(?:\s*(?P<split>{suffixes})(?P<tail>\d{{1,3}})\b)?(?P<currency>\s*(?:{currency})\b)?"
    ))
    .expect("amount pattern")
});

static SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    let suffixes = alternation(MULTIPLIERS.iter().map(|(w, _)| *w));
    Regex::new(&format!(r"(?:{suffixes})")).expect("suffix pattern")
});

static LEADING_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut keywords: Vec<&str> = INCOME_KEYWORDS
        .iter()
        .chain(EXPENSE_KEYWORDS)
        .copied()
        .collect();
    keywords.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
    Regex::new(&format!(r"(?i)^(?:{})\s+", alternation(keywords.into_iter())))
        .expect("leading keyword pattern")
});

static CONNECTOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation(CONNECTORS.iter().copied())))
        .expect("connector pattern")
});

/// Lowercased transcript with number words replaced by digits.
///
/// `origin[i]` is the byte offset in the raw transcript that produced byte
/// `i` of `text`; it carries one trailing entry for `text.len()`.
struct Normalized {
    text: String,
    origin: Vec<usize>,
}

impl Normalized {
    fn new(raw: &str) -> Self {
        let mut lower = String::with_capacity(raw.len());
        let mut lower_origin = Vec::with_capacity(raw.len() + 1);
        for (offset, c) in raw.char_indices() {
            for lc in c.to_lowercase() {
                let before = lower.len();
                lower.push(lc);
                lower_origin.resize(lower_origin.len() + (lower.len() - before), offset);
            }
        }
        lower_origin.push(raw.len());

        let mut text = String::with_capacity(lower.len());
        let mut origin = Vec::with_capacity(lower_origin.len());
        let mut last = 0;
        for m in NUMBER_WORD_RE.find_iter(&lower) {
            text.push_str(&lower[last..m.start()]);
            origin.extend_from_slice(&lower_origin[last..m.start()]);

            let word = m.as_str();
            if is_multiplier(word) && follows_numeral(&text) {
                text.push_str(word);
                origin.extend_from_slice(&lower_origin[m.range()]);
            } else {
                let digits = number_word_value(word).to_string();
                text.push_str(&digits);
                origin.resize(origin.len() + digits.len(), lower_origin[m.start()]);
            }
            last = m.end();
        }
        text.push_str(&lower[last..]);
        origin.extend_from_slice(&lower_origin[last..]);

        Self { text, origin }
    }

    fn raw_span(&self, range: Range<usize>) -> Range<usize> {
        self.origin[range.start]..self.origin[range.end]
    }
}

fn number_word_value(word: &str) -> u64 {
    NUMBER_WORDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, v)| *v)
        .unwrap_or(0)
}

fn is_multiplier(word: &str) -> bool {
    MULTIPLIERS.iter().any(|(w, _)| *w == word)
}

fn multiplier(word: &str) -> f64 {
    MULTIPLIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, m)| *m)
        .unwrap_or(1.0)
}

/// True if the last token of `text` is a numeral or a magnitude suffix, so a
/// following magnitude word should stay a suffix.
fn follows_numeral(text: &str) -> bool {
    match text.split_whitespace().last() {
        Some(token) => {
            is_multiplier(token)
                || (token.starts_with(|c: char| c.is_ascii_digit())
                    && token.ends_with(|c: char| c.is_ascii_digit()))
        }
        None => false,
    }
}

/// Read a numeral with optional `.`/`,` separators.
///
/// Groups of exactly three digits after every separator are thousands
/// grouping ("50.000"), unless there is a single separator and a magnitude
/// suffix follows ("1,500 triệu" is 1.5 million). Otherwise a single
/// separator is a decimal point.
fn parse_numeral(raw: &str, has_suffix: bool) -> Option<f64> {
    let groups: Vec<&str> = raw.split(['.', ',']).collect();
    match groups.as_slice() {
        [whole] => whole.parse().ok(),
        [first, rest @ ..] => {
            let thousands = rest.iter().all(|g| g.len() == 3) && (rest.len() > 1 || !has_suffix);
            if thousands {
                groups.concat().parse().ok()
            } else if let [fraction] = rest {
                format!("{first}.{fraction}").parse().ok()
            } else {
                None
            }
        }
        [] => None,
    }
}

/// A numeral found in the normalized text.
struct Candidate {
    span: Range<usize>,
    value: Option<f64>,
    /// Has a magnitude suffix or a currency word, so it reads as money even
    /// when it was spelled out.
    qualified: bool,
}

fn amount_candidates(normalized: &str) -> Vec<Candidate> {
    AMOUNT_RE
        .captures_iter(normalized)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let suffix = caps.name("suffix").map_or("", |m| m.as_str());
            let split = caps.name("split").map(|m| m.as_str());
            let has_magnitude = !suffix.trim().is_empty() || split.is_some();

            let factor: f64 = SUFFIX_RE
                .find_iter(suffix)
                .map(|m| multiplier(m.as_str()))
                .chain(split.map(multiplier))
                .product();
            // "2tr5" is 2.5 million: the glued digits continue the numeral.
            let fraction = match caps.name("tail") {
                Some(tail) => {
                    Some(tail.as_str().parse::<f64>().ok()? / 10f64.powi(tail.as_str().len() as i32))
                }
                None => Some(0.0),
            };
            let value = parse_numeral(&caps["num"], has_magnitude)
                .zip(fraction)
                .map(|(n, f)| (n + f) * factor);

            let mut span = whole.range();
            let mut currency = caps.name("currency");
            if let Some(c) = currency {
                // "đồng hồ" is a watch, not money.
                if c.as_str().trim() == "đồng"
                    && normalized[c.end()..].split_whitespace().next() == Some("hồ")
                {
                    span.end = c.start();
                    currency = None;
                }
            }

            Some(Candidate {
                span,
                value,
                qualified: has_magnitude || currency.is_some(),
            })
        })
        .collect()
}

/// Index of the largest usable candidate; ties keep the earliest.
fn largest_candidate(candidates: &[Candidate]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        let Some(value) = candidate
            .value
            .filter(|v| v.is_finite() && *v > 0.0 && *v <= MAX_AMOUNT)
        else {
            continue;
        };
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((i, value));
        }
    }
    best.map(|(i, _)| i)
}

/// Income only when an income keyword appears and no expense keyword does.
pub fn is_income_text(text: &str) -> bool {
    let lower = text.to_lowercase();
    let has_income = INCOME_KEYWORDS.iter().any(|k| lower.contains(k));
    let has_expense = EXPENSE_KEYWORDS.iter().any(|k| lower.contains(k));
    has_income && !has_expense
}

fn extract_note(raw: &str, amount_spans: &[Range<usize>]) -> String {
    let mut stripped = String::with_capacity(raw.len());
    let mut last = 0;
    for span in amount_spans {
        if span.start < last {
            continue;
        }
        stripped.push_str(&raw[last..span.start]);
        stripped.push(' ');
        last = span.end;
    }
    stripped.push_str(&raw[last..]);

    let note = LEADING_KEYWORD_RE.replace(stripped.trim_start(), "");
    let note = CONNECTOR_RE.replace_all(&note, " ");
    note.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn parse_voice_input(text: &str) -> VoiceTransactionData {
    let normalized = Normalized::new(text);
    let candidates = amount_candidates(&normalized.text);
    let chosen = largest_candidate(&candidates);
    let amount = chosen.and_then(|i| candidates[i].value).map(|v| v.round() as u64);
    let is_income = is_income_text(text);

    // Written numerals always leave the note. A bare number word ("tư" in
    // "tư vấn", "ba" for dad) stays unless it is the amount itself.
    let spans: Vec<Range<usize>> = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, candidate)| {
            let span = normalized.raw_span(candidate.span.clone());
            let written = text[span.clone()].bytes().any(|b| b.is_ascii_digit());
            (written || candidate.qualified || Some(i) == chosen).then_some(span)
        })
        .collect();
    let note = extract_note(text, &spans);

    tracing::debug!(?amount, is_income, %note, candidates = candidates.len(), "parsed voice input");
    VoiceTransactionData {
        amount,
        note,
        is_income,
    }
}

/// Sample utterances shown to users as guidance.
pub fn voice_input_examples() -> &'static [&'static str] {
    EXAMPLES
}

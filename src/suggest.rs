use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::models::{ExpenseCategory, Transaction, TransactionType};

/// Default trigger threshold: suggest only once a note is longer than this.
pub const DEFAULT_MIN_NOTE_LEN: usize = 2;

/// Token → category id → occurrence count, learned from transaction notes.
///
/// Keys are single tokens and adjacent token pairs joined by a space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternModel {
    patterns: BTreeMap<String, BTreeMap<String, u32>>,
}

impl PatternModel {
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of distinct tokens and bigrams.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn count(&self, token: &str, category_id: &str) -> u32 {
        self.patterns
            .get(token)
            .and_then(|counts| counts.get(category_id))
            .copied()
            .unwrap_or(0)
    }

    /// Categories seen with `token`, most frequent first, ties by id.
    pub fn ranked(&self, token: &str) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self
            .patterns
            .get(token)
            .map(|counts| counts.iter().map(|(id, n)| (id.as_str(), *n)).collect())
            .unwrap_or_default();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    fn record(&mut self, key: String, category_id: &str) {
        *self
            .patterns
            .entry(key)
            .or_default()
            .entry(category_id.to_string())
            .or_insert(0) += 1;
    }
}

/// Lowercase words of a note. Splits on anything that is not a letter or
/// digit and drops purely numeric tokens, which are amounts rather than
/// descriptions.
pub fn tokenize(note: &str) -> Vec<String> {
    note.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !t.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

fn pattern_keys(tokens: &[String]) -> Vec<String> {
    let mut keys = tokens.to_vec();
    keys.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    keys
}

pub fn learn_from_history(
    transactions: &[Transaction],
    categories: &[ExpenseCategory],
) -> PatternModel {
    let known: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();
    let mut model = PatternModel::default();
    let mut learned = 0usize;
    let mut stale = 0usize;

    for txn in transactions {
        let Some(note) = txn.note.as_deref().filter(|n| !n.trim().is_empty()) else {
            continue;
        };
        if !known.contains(txn.category_id.as_str()) {
            stale += 1;
            continue;
        }
        for key in pattern_keys(&tokenize(note)) {
            model.record(key, &txn.category_id);
        }
        learned += 1;
    }

    tracing::debug!(learned, stale, patterns = model.len(), "learned category patterns");
    model
}

/// Score every supplied category against the note's tokens and return the
/// best one. Only categories in `categories` can be returned; equal scores
/// go to the one listed first.
pub fn suggest_category_with_learning(
    note: &str,
    model: &PatternModel,
    categories: &[ExpenseCategory],
) -> Option<ExpenseCategory> {
    let keys = pattern_keys(&tokenize(note));
    if keys.is_empty() || model.is_empty() {
        return None;
    }

    let mut best: Option<(&ExpenseCategory, u32)> = None;
    for category in categories {
        let score: u32 = keys.iter().map(|k| model.count(k, &category.id)).sum();
        if score > 0 && best.map_or(true, |(_, top)| score > top) {
            best = Some((category, score));
        }
    }

    tracing::debug!(
        note,
        suggestion = best.map(|(c, _)| c.id.as_str()),
        score = best.map(|(_, s)| s),
        "category suggestion"
    );
    best.map(|(category, _)| category.clone())
}

/// Whether a suggestion should be requested for an entry being typed:
/// expense entries with a note longer than `min_len` characters.
pub fn should_suggest(note: &str, txn_type: TransactionType, min_len: usize) -> bool {
    txn_type == TransactionType::Expense && note.trim().chars().count() > min_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::Icon;

    fn category(id: &str) -> ExpenseCategory {
        ExpenseCategory {
            id: id.to_string(),
            name: id.to_string(),
            icon: Icon::Other,
            color: "#6b7280".to_string(),
            category_type: TransactionType::Expense,
        }
    }

    fn txn(id: i64, category_id: &str, note: Option<&str>) -> Transaction {
        Transaction {
            id,
            amount: 10_000.0,
            txn_type: TransactionType::Expense,
            category_id: category_id.to_string(),
            wallet_id: "cash".to_string(),
            date: "2025-01-15".to_string(),
            note: note.map(str::to_string),
            created_at: "2025-01-15 08:00:00".to_string(),
        }
    }

    fn categories() -> Vec<ExpenseCategory> {
        vec![category("food"), category("transport"), category("shopping")]
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Mua Cafe, sáng!"), vec!["mua", "cafe", "sáng"]);
        assert_eq!(tokenize("xăng 50000 xe"), vec!["xăng", "xe"]);
        assert!(tokenize("  ...  ").is_empty());
    }

    #[test]
    fn test_empty_history_gives_empty_model() {
        let model = learn_from_history(&[], &categories());
        assert!(model.is_empty());
        assert_eq!(suggest_category_with_learning("mua cafe", &model, &categories()), None);
    }

    #[test]
    fn test_learns_unigrams_and_bigrams() {
        let history = vec![txn(1, "food", Some("cafe sữa")), txn(2, "food", Some("cafe"))];
        let model = learn_from_history(&history, &categories());
        assert_eq!(model.count("cafe", "food"), 2);
        assert_eq!(model.count("sữa", "food"), 1);
        assert_eq!(model.count("cafe sữa", "food"), 1);
        assert_eq!(model.count("cafe", "transport"), 0);
    }

    #[test]
    fn test_blank_notes_are_ignored() {
        let history = vec![txn(1, "food", None), txn(2, "food", Some("   "))];
        assert!(learn_from_history(&history, &categories()).is_empty());
    }

    #[test]
    fn test_suggests_category_seen_with_token() {
        let history = vec![
            txn(1, "food", Some("cafe sáng")),
            txn(2, "food", Some("cafe với bạn")),
            txn(3, "transport", Some("đổ xăng")),
        ];
        let model = learn_from_history(&history, &categories());
        let suggestion = suggest_category_with_learning("mua cafe sáng", &model, &categories());
        assert_eq!(suggestion.map(|c| c.id), Some("food".to_string()));
    }

    #[test]
    fn test_highest_aggregate_score_wins() {
        let history = vec![
            txn(1, "shopping", Some("áo")),
            txn(2, "transport", Some("grab")),
            txn(3, "transport", Some("grab về nhà")),
        ];
        let model = learn_from_history(&history, &categories());
        let suggestion = suggest_category_with_learning("grab đi mua áo", &model, &categories());
        assert_eq!(suggestion.map(|c| c.id), Some("transport".to_string()));
    }

    #[test]
    fn test_no_signal_returns_none() {
        let history = vec![txn(1, "food", Some("cafe"))];
        let model = learn_from_history(&history, &categories());
        assert_eq!(suggest_category_with_learning("tiền điện", &model, &categories()), None);
        assert_eq!(suggest_category_with_learning("   ", &model, &categories()), None);
        assert_eq!(suggest_category_with_learning("", &model, &categories()), None);
    }

    #[test]
    fn test_tie_goes_to_first_listed_category() {
        let history = vec![txn(1, "shopping", Some("chợ")), txn(2, "food", Some("chợ"))];
        let model = learn_from_history(&history, &categories());

        let listed = categories();
        let suggestion = suggest_category_with_learning("đi chợ", &model, &listed);
        assert_eq!(suggestion.map(|c| c.id), Some("food".to_string()));

        let reversed: Vec<_> = listed.into_iter().rev().collect();
        let suggestion = suggest_category_with_learning("đi chợ", &model, &reversed);
        assert_eq!(suggestion.map(|c| c.id), Some("shopping".to_string()));
    }

    #[test]
    fn test_stale_category_is_never_returned() {
        let history = vec![
            txn(1, "deleted", Some("cafe")),
            txn(2, "deleted", Some("cafe")),
            txn(3, "food", Some("cafe")),
        ];
        let all = vec![category("deleted"), category("food")];
        let model = learn_from_history(&history, &all);

        let current = categories();
        let suggestion = suggest_category_with_learning("cafe", &model, &current);
        assert_eq!(suggestion.map(|c| c.id), Some("food".to_string()));

        let only_deleted = vec![txn(1, "deleted", Some("trà sữa"))];
        let model = learn_from_history(&only_deleted, &all);
        assert_eq!(suggest_category_with_learning("trà sữa", &model, &current), None);
    }

    #[test]
    fn test_learning_skips_unknown_categories() {
        let history = vec![txn(1, "gone", Some("cafe"))];
        assert!(learn_from_history(&history, &categories()).is_empty());
    }

    #[test]
    fn test_ranked() {
        let history = vec![
            txn(1, "transport", Some("xe")),
            txn(2, "shopping", Some("xe")),
            txn(3, "shopping", Some("xe")),
            txn(4, "food", Some("xe")),
        ];
        let model = learn_from_history(&history, &categories());
        assert_eq!(
            model.ranked("xe"),
            vec![("shopping", 2), ("food", 1), ("transport", 1)]
        );
        assert!(model.ranked("missing").is_empty());
    }

    #[test]
    fn test_learning_is_deterministic() {
        let history = vec![txn(1, "food", Some("phở bò")), txn(2, "transport", Some("xe buýt"))];
        assert_eq!(
            learn_from_history(&history, &categories()),
            learn_from_history(&history, &categories())
        );
    }

    #[test]
    fn test_should_suggest() {
        assert!(should_suggest("cafe", TransactionType::Expense, DEFAULT_MIN_NOTE_LEN));
        assert!(!should_suggest("ăn", TransactionType::Expense, DEFAULT_MIN_NOTE_LEN));
        assert!(!should_suggest("  ăn  ", TransactionType::Expense, DEFAULT_MIN_NOTE_LEN));
        assert!(!should_suggest("lương tháng", TransactionType::Income, DEFAULT_MIN_NOTE_LEN));
    }
}

/// Canonical Japanese food-allergen keyword list. Order matters: keyword
/// resolution always takes the first match in this order.
pub const ALLERGY_KEYWORDS: [&str; 26] = [
    "えび",
    "かに",
    "小麦",
    "そば",
    "卵",
    "乳",
    "落花生",
    "アーモンド",
    "あわび",
    "いか",
    "いくら",
    "オレンジ",
    "キウイフルーツ",
    "牛肉",
    "ごま",
    "さけ",
    "さば",
    "大豆",
    "鶏肉",
    "バナナ",
    "豚肉",
    "まつたけ",
    "もも",
    "やまいも",
    "りんご",
    "ゼラチン",
];

/// Filled marks meaning the allergen is an ingredient of the dish.
pub const CONTAINS_SYMBOLS: [char; 2] = ['●', '・'];

/// Outline marks meaning cross-contamination risk from shared equipment.
pub const SHARES_SYMBOLS: [char; 2] = ['○', '▲'];

/// Rows repeating any of this many leading keywords are treated as stray
/// header rows and skipped.
const HEADER_LIKE_KEYWORDS: usize = 5;

/// Read-only allergen vocabulary. Built once at startup and passed by
/// reference into the normalizer; safe to share across concurrent
/// conversions.
#[derive(Debug, Clone, Copy)]
pub struct AllergyVocabulary {
    keywords: &'static [&'static str],
    contains_symbols: &'static [char],
    shares_symbols: &'static [char],
}

impl AllergyVocabulary {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            keywords: &ALLERGY_KEYWORDS,
            contains_symbols: &CONTAINS_SYMBOLS,
            shares_symbols: &SHARES_SYMBOLS,
        }
    }

    #[must_use]
    pub const fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }

    /// First keyword, in vocabulary order, appearing in `text` as a
    /// substring.
    #[must_use]
    pub fn first_keyword_in(&self, text: &str) -> Option<&'static str> {
        self.keywords
            .iter()
            .find(|keyword| text.contains(*keyword))
            .copied()
    }

    /// Whether `text` repeats one of the leading keywords, marking a stray
    /// header-like row.
    #[must_use]
    pub fn is_header_like(&self, text: &str) -> bool {
        self.keywords[..HEADER_LIKE_KEYWORDS.min(self.keywords.len())]
            .iter()
            .any(|keyword| text.contains(keyword))
    }

    #[must_use]
    pub fn has_contains_symbol(&self, text: &str) -> bool {
        text.contains(self.contains_symbols)
    }

    #[must_use]
    pub fn has_shares_symbol(&self, text: &str) -> bool {
        text.contains(self.shares_symbols)
    }

    /// Whether `text` holds nothing but allergen marks and whitespace. A
    /// first cell like "●" is a marker, not a menu name.
    #[must_use]
    pub fn is_marks_only(&self, text: &str) -> bool {
        !text.trim().is_empty()
            && text.chars().all(|ch| {
                ch.is_whitespace()
                    || self.contains_symbols.contains(&ch)
                    || self.shares_symbols.contains(&ch)
            })
    }
}

impl Default for AllergyVocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

use super::model::Sentiment;
use serde::{Deserialize, Serialize};

const BULLISH: [&str; 16] = [
    "gain", "rise", "grow", "up", "strong", "positive", "boost", "rally", "surge", "profit",
    "success", "optimistic", "breakthrough", "expansion", "increase", "outperform",
];

const BEARISH: [&str; 16] = [
    "lose", "fall", "drop", "down", "weak", "negative", "slump", "decline", "plunge", "loss",
    "fail", "pessimistic", "crisis", "contraction", "decrease", "underperform",
];

/// Keyword sets for the headline classifier. Loaded from the `[lexicon]`
/// table of the config file; missing lists fall back to the built-in terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default = "default_bullish")]
    pub bullish: Vec<String>,
    #[serde(default = "default_bearish")]
    pub bearish: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon {
            bullish: default_bullish(),
            bearish: default_bearish(),
        }
    }
}

fn default_bullish() -> Vec<String> {
    BULLISH.iter().map(|s| s.to_string()).collect()
}

fn default_bearish() -> Vec<String> {
    BEARISH.iter().map(|s| s.to_string()).collect()
}

impl Lexicon {
    /// Each term counts at most once, however often it appears. Equal
    /// scores (including none at all) are neutral.
    pub fn classify(&self, title: &str, description: &str) -> Sentiment {
        let text = format!("{} {}", title, description).to_lowercase();
        let bullish = matched_terms(&text, &self.bullish);
        let bearish = matched_terms(&text, &self.bearish);

        if bullish > bearish {
            Sentiment::Bullish
        } else if bearish > bullish {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }
}

fn matched_terms(text: &str, terms: &[String]) -> usize {
    terms
        .iter()
        .filter(|t| !t.is_empty() && text.contains(&t.to_lowercase()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sets_have_sixteen_terms() {
        let lex = Lexicon::default();
        assert_eq!(lex.bullish.len(), 16);
        assert_eq!(lex.bearish.len(), 16);
    }

    #[test]
    fn bullish_only_is_bullish() {
        let lex = Lexicon::default();
        for term in BULLISH {
            assert_eq!(lex.classify(term, ""), Sentiment::Bullish, "term {term}");
        }
        assert_eq!(
            lex.classify("Stocks surge on strong earnings growth", "Markets rally as profit beats forecasts"),
            Sentiment::Bullish
        );
    }

    #[test]
    fn bearish_only_is_bearish() {
        let lex = Lexicon::default();
        for term in ["slump", "plunge", "crisis", "contraction", "pessimistic"] {
            assert_eq!(lex.classify("", term), Sentiment::Bearish, "term {term}");
        }
        assert_eq!(
            lex.classify("Banks slump amid credit crisis", "Lenders plunge"),
            Sentiment::Bearish
        );
    }

    #[test]
    fn no_keywords_is_neutral() {
        let lex = Lexicon::default();
        assert_eq!(lex.classify("Fed meets on Tuesday", "Minutes due next week"), Sentiment::Neutral);
        assert_eq!(lex.classify("", ""), Sentiment::Neutral);
    }

    #[test]
    fn tie_is_neutral() {
        let lex = Lexicon::default();
        assert_eq!(lex.classify("Shares up", "then down"), Sentiment::Neutral);
        assert_eq!(lex.classify("Rally fades", "as crisis looms"), Sentiment::Neutral);
    }

    #[test]
    fn presence_not_frequency() {
        let lex = Lexicon::default();
        // "rally" three times still counts once against slump + plunge
        assert_eq!(
            lex.classify("Rally rally rally", "slump and plunge"),
            Sentiment::Bearish
        );
    }

    #[test]
    fn matching_ignores_case() {
        let lex = Lexicon::default();
        for title in ["GAIN", "Gain", "gain"] {
            assert_eq!(lex.classify(title, ""), Sentiment::Bullish);
        }
    }

    #[test]
    fn configured_terms_replace_defaults() {
        let lex = Lexicon {
            bullish: vec!["Moon".into()],
            bearish: vec!["rekt".into()],
        };
        assert_eq!(lex.classify("to the moon", ""), Sentiment::Bullish);
        assert_eq!(lex.classify("strong gains", ""), Sentiment::Neutral);
    }
}

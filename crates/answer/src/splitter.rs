//! Compound question splitting.
//!
//! A compound question asks for two facts about one subject, joined by
//! "and": "When and where did he die?" becomes "when did he die?" and
//! "where did he die?". Detection is plain string matching, not grammar.

/// Question words recognized by the splitter, in match-priority order.
pub const WH_WORDS: [&str; 7] = ["when", "where", "who", "what", "which", "how", "why"];

/// Turns one question into the sub-questions that should be answered.
pub trait CompoundQuestionSplitter: Send + Sync {
    /// Returns either `[question]` unchanged or the derived sub-questions.
    fn split(&self, question: &str) -> Vec<String>;
}

/// String-heuristic splitter for "<wh> and <wh> <subject>?" questions.
///
/// Rules, applied to the lower-cased, trimmed question:
/// 1. For each wh-word `qt` in [`WH_WORDS`] order, look for `"{qt} and"`.
/// 2. On a hit, cut the question at the first `"and"` substring.
/// 3. Take the first wh-word that is a whole token before the cut and the
///    first that is a whole token after it. If either is missing, try the
///    next `qt`.
/// 4. The subject is everything after the first occurrence of the second
///    wh-word, with `?` removed. Emit `"{first} {subject}?"` and
///    `"{second} {subject}?"`.
///
/// Questions that match nothing come back unchanged, original casing kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSplitter;

impl HeuristicSplitter {
    pub fn new() -> Self {
        Self
    }

    fn split_normalized(normalized: &str) -> Option<[String; 2]> {
        for qt in WH_WORDS {
            if !normalized.contains(&format!("{} and", qt)) {
                continue;
            }

            let Some((before, after)) = normalized.split_once("and") else {
                continue;
            };

            let (Some(first), Some(second)) = (first_wh_token(before), first_wh_token(after))
            else {
                continue;
            };

            let core = normalized.replace('?', "");
            let core = core.trim();
            let subject = core
                .split_once(second)
                .map(|(_, rest)| rest)
                .unwrap_or(core)
                .trim();

            return Some([
                format!("{} {}?", first, subject),
                format!("{} {}?", second, subject),
            ]);
        }

        None
    }
}

impl CompoundQuestionSplitter for HeuristicSplitter {
    fn split(&self, question: &str) -> Vec<String> {
        let normalized = question.to_lowercase();

        match Self::split_normalized(normalized.trim()) {
            Some(parts) => {
                tracing::debug!("Split compound question {:?} into {:?}", question, parts);
                parts.into()
            }
            None => vec![question.to_string()],
        }
    }
}

/// First wh-word (in [`WH_WORDS`] order) that occurs as a whole
/// whitespace-separated token of `text`.
fn first_wh_token(text: &str) -> Option<&'static str> {
    WH_WORDS
        .into_iter()
        .find(|w| text.split_whitespace().any(|token| token == *w))
}

/// Split a question with the default [`HeuristicSplitter`].
pub fn split_compound(question: &str) -> Vec<String> {
    HeuristicSplitter.split(question)
}

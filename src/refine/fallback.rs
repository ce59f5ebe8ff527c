//! Offline fallback refiner: a deterministic substitute for the API
//! path, used when no key is configured or the service fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::refine::Refined;

static URGENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(today|urgent|asap|now|immediately)\b").unwrap());
static IMPORTANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(important|goal|deadline|must)\b").unwrap());
static NEAR_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(weekly|this week|soon)\b").unwrap());
static LEADING_TO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^to\s+").unwrap());
static I_WANT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bi want\b").unwrap());
static LEADING_MODAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(i\s+)?(will|want to|need to|to)\s*").unwrap());

/// Default priority when no keyword class matches.
const DEFAULT_PRIORITY: u8 = 5;

/// Refine a single task without any network call.
///
/// Priority comes from the first matching keyword class (urgency 1,
/// importance 2, near-term 3, otherwise 5); keyword matching is done on
/// a lowercased copy so the output casing is unaffected. The display
/// text becomes an accomplished-goal statement; the past-tense
/// restatement drops a leading modal phrase.
pub fn refine_local(text: &str) -> Refined {
    let lower = text.to_lowercase();
    let priority = if URGENCY.is_match(&lower) {
        1
    } else if IMPORTANCE.is_match(&lower) {
        2
    } else if NEAR_TERM.is_match(&lower) {
        3
    } else {
        DEFAULT_PRIORITY
    };

    let stripped = LEADING_TO.replace(text, "");
    let rewritten = I_WANT.replace_all(&stripped, "I desire to");
    let goal_text = format!("I have successfully {rewritten}.");

    let base = LEADING_MODAL.replace(text, "");
    let base = base.strip_suffix('.').unwrap_or(base.as_ref());
    let original = format!("{base}.");

    Refined {
        text: goal_text,
        priority,
        original,
    }
}

/// Refine a batch, one entry per input, in input order.
pub fn refine_all_local(texts: &[String]) -> Vec<Refined> {
    texts.iter().map(|t| refine_local(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn urgency_keyword_wins() {
        let refined = refine_local("I need to finish the urgent report");
        assert_eq!(refined.priority, 1);
        assert!(refined.text.starts_with("I have successfully"));
        assert_eq!(refined.original, "finish the urgent report.");
    }

    #[test]
    fn keyword_classes_in_precedence_order() {
        assert_eq!(refine_local("urgent deadline today").priority, 1);
        assert_eq!(refine_local("hit the deadline").priority, 2);
        assert_eq!(refine_local("plan this week's meals").priority, 3);
        assert_eq!(refine_local("alphabetize the bookshelf").priority, 5);
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert_eq!(refine_local("URGENT: call the plumber").priority, 1);
        assert_eq!(refine_local("An Important Goal").priority, 2);
    }

    #[test]
    fn text_strips_leading_to() {
        let refined = refine_local("to buy milk");
        assert_eq!(refined.text, "I have successfully buy milk.");
    }

    #[test]
    fn text_replaces_i_want() {
        let refined = refine_local("I want a quieter keyboard");
        assert_eq!(refined.text, "I have successfully I desire to a quieter keyboard.");
    }

    #[test]
    fn original_strips_modal_phrase_and_dot() {
        assert_eq!(refine_local("I will call mom.").original, "call mom.");
        assert_eq!(refine_local("want to learn piano").original, "learn piano.");
        assert_eq!(refine_local("clean the garage").original, "clean the garage.");
    }

    #[test]
    fn is_deterministic() {
        let a = refine_local("submit the weekly report");
        let b = refine_local("submit the weekly report");
        assert_eq!(a, b);
        assert_eq!(a.priority, 3);
    }

    #[test]
    fn batch_preserves_order() {
        let refined = refine_all_local(&["urgent thing".into(), "someday thing".into()]);
        assert_eq!(refined.len(), 2);
        assert_eq!(refined[0].priority, 1);
        assert_eq!(refined[1].priority, 5);
    }
}

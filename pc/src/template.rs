//! Prompt template resolution
//!
//! Prompt resources carry learner placeholders (`{{name}}`, `{{profession}}`,
//! `{{curiosity}}`; the single-brace forms are accepted too). Resolution runs a
//! fixed sequence of substitutions, most specific first:
//!
//! 1. `As a {{profession}} who is curious about {{curiosity}}` (or without
//!    `who is`) becomes [`FRAMING_PHRASE`]
//! 2. any remaining `As a {{profession}}` becomes [`FRAMING_PHRASE`]
//! 3. `{{name}}` becomes the learner's name or [`NAME_FALLBACK`]
//! 4. `{{profession}}` becomes [`PROFESSION_FALLBACK`]
//! 5. `{{curiosity}}` becomes [`CURIOSITY_FALLBACK`]
//!
//! The order matters: once a lead-in clause is rewritten the profession must
//! not leak back in through a bare placeholder.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::domain::LearnerProfile;

/// Replaces profession/curiosity lead-in clauses
pub const FRAMING_PHRASE: &str = "Given what you know about me";

/// Stands in for an absent learner name
pub const NAME_FALLBACK: &str = "the learner";

/// Stands in for a bare `{{profession}}` placeholder
pub const PROFESSION_FALLBACK: &str = "someone in my position";

/// Stands in for a bare `{{curiosity}}` placeholder
pub const CURIOSITY_FALLBACK: &str = "the topics I care about";

const PROFESSION: &str = r"(?:\{\{profession\}\}|\{profession\})";
const CURIOSITY: &str = r"(?:\{\{curiosity\}\}|\{curiosity\})";

static CURIOUS_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bAs a {PROFESSION}\s+(?:who is )?curious about {CURIOSITY}"))
        .expect("curious clause pattern is valid")
});

static PROFESSION_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\bAs a {PROFESSION}")).expect("profession clause pattern is valid"));

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{name\}\}|\{name\}").expect("name pattern is valid"));

static PROFESSION_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PROFESSION).expect("profession pattern is valid"));

static CURIOSITY_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CURIOSITY).expect("curiosity pattern is valid"));

/// Resolve a raw prompt template for a learner
pub fn resolve(template: &str, profile: &LearnerProfile) -> String {
    let name = profile.display_name().unwrap_or(NAME_FALLBACK);

    let text = CURIOUS_CLAUSE.replace_all(template, NoExpand(FRAMING_PHRASE));
    let text = PROFESSION_CLAUSE.replace_all(&text, NoExpand(FRAMING_PHRASE));
    let text = NAME.replace_all(&text, NoExpand(name));
    let text = PROFESSION_PLACEHOLDER.replace_all(&text, NoExpand(PROFESSION_FALLBACK));
    let text = CURIOSITY_PLACEHOLDER.replace_all(&text, NoExpand(CURIOSITY_FALLBACK));

    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nurse() -> LearnerProfile {
        LearnerProfile::new(Some("Ada".to_string()), "nurse", "genomics")
    }

    #[test]
    fn test_curious_clause_replaced_wholesale() {
        let out = resolve("As a {profession} who is curious about {curiosity}, explain X", &nurse());

        assert_eq!(out.matches(FRAMING_PHRASE).count(), 1);
        assert!(!out.contains("nurse"));
        assert!(!out.contains("genomics"));
        assert!(out.contains("explain X"));
        assert_eq!(out, "Given what you know about me, explain X");
    }

    #[test]
    fn test_double_brace_and_alternate_phrasing() {
        let out = resolve(
            "As a {{profession}} curious about {{curiosity}}, what should I read?",
            &nurse(),
        );
        assert_eq!(out, "Given what you know about me, what should I read?");
    }

    #[test]
    fn test_clause_is_case_insensitive() {
        let out = resolve("as A {{profession}}   WHO IS curious about {{curiosity}}: go", &nurse());
        assert_eq!(out, "Given what you know about me: go");
    }

    #[test]
    fn test_bare_profession_clause() {
        let out = resolve("As a {{profession}}, how does {{curiosity}} matter?", &nurse());
        assert_eq!(out, "Given what you know about me, how does the topics I care about matter?");
    }

    #[test]
    fn test_clause_needs_word_boundary() {
        let out = resolve("What has a {{profession}} learned?", &nurse());
        assert_eq!(out, "What has a someone in my position learned?");

        let out = resolve("Explain it. As a {{profession}}, what now?", &nurse());
        assert_eq!(out, "Explain it. Given what you know about me, what now?");
    }

    #[test]
    fn test_name_and_fallbacks() {
        let out = resolve("Hi {{name}}, {name}! For {{profession}}.", &nurse());
        assert_eq!(out, "Hi Ada, Ada! For someone in my position.");

        let anon = LearnerProfile::new(None, "nurse", "genomics");
        assert_eq!(resolve("Explain to {{name}}", &anon), "Explain to the learner");
    }

    #[test]
    fn test_name_is_inserted_literally() {
        let profile = LearnerProfile::new(Some("$1 Bob".to_string()), "x", "y");
        assert_eq!(resolve("Hello {{name}}", &profile), "Hello $1 Bob");
    }

    #[test]
    fn test_placeholders_are_case_sensitive() {
        let out = resolve("{{Name}} {{PROFESSION}}", &nurse());
        assert_eq!(out, "{{Name}} {{PROFESSION}}");
    }

    #[test]
    fn test_text_without_placeholders_untouched() {
        let t = "What is the difference between DNA and RNA?";
        assert_eq!(resolve(t, &nurse()), t);
    }

    proptest! {
        #[test]
        fn prop_resolve_is_deterministic(template in ".{0,80}", name in proptest::option::of("[a-zA-Z ]{0,12}")) {
            let profile = LearnerProfile::new(name, "nurse", "genomics");
            prop_assert_eq!(resolve(&template, &profile), resolve(&template, &profile));
        }

        #[test]
        fn prop_placeholder_only_templates_substitute_independently(
            parts in proptest::collection::vec(
                prop_oneof![
                    Just("{{name}}".to_string()),
                    Just("{{profession}}".to_string()),
                    Just("{{curiosity}}".to_string()),
                    "[a-z ,.?]{0,10}",
                ],
                0..8,
            )
        ) {
            let template = parts.concat();
            prop_assume!(!template.to_lowercase().contains("as a"));

            let expected: String = parts
                .iter()
                .map(|p| match p.as_str() {
                    "{{name}}" => "Ada",
                    "{{profession}}" => PROFESSION_FALLBACK,
                    "{{curiosity}}" => CURIOSITY_FALLBACK,
                    other => other,
                })
                .collect();

            prop_assert_eq!(resolve(&template, &nurse()), expected);
        }
    }
}

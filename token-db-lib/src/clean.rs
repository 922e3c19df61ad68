//! Text cleaning applied to each record before grouping.

use std::sync::LazyLock;

use regex::Regex;

use token_db_core::OutputSchema;

static NAME_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*Token\s*$").expect("static pattern"));

static TYPE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Token\s+").expect("static pattern"));

/// Parenthesised reminder text, e.g. "(This creature can't block.)".
static REMINDER_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("static pattern"));

/// Strip one trailing "Token" (any case) and surrounding whitespace.
///
/// An empty result means the record has no usable name.
pub fn clean_name(name: &str) -> String {
    NAME_SUFFIX.replace(name, "").trim().to_string()
}

/// Clean a type line according to the schema's policy.
///
/// `Popularity` drops a leading "Token " since it is not a real card type.
/// `Legacy` adds "Token " unless the line already mentions it.
pub fn clean_type(type_line: &str, schema: OutputSchema) -> String {
    match schema {
        OutputSchema::Popularity => TYPE_PREFIX.replace(type_line, "").trim().to_string(),
        OutputSchema::Legacy => {
            if type_line.contains("Token") {
                type_line.to_string()
            } else {
                format!("Token {type_line}")
            }
        }
    }
}

/// Remove reminder text and collapse whitespace (newlines included).
pub fn clean_abilities(abilities: &str) -> String {
    if abilities.is_empty() {
        return String::new();
    }
    let stripped = REMINDER_TEXT.replace_all(abilities, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_suffix_stripped_once() {
        assert_eq!(clean_name("Goblin Token"), "Goblin");
        assert_eq!(clean_name("Goblin TOKEN"), "Goblin");
        assert_eq!(clean_name("Goblin token  "), "Goblin");
        assert_eq!(clean_name("Goblin"), "Goblin");
        assert_eq!(clean_name("Goblin Token Token"), "Goblin Token");
    }

    #[test]
    fn name_suffix_needs_whole_word_at_end() {
        assert_eq!(clean_name("Tokens of Power"), "Tokens of Power");
        assert_eq!(clean_name("  Elf Warrior "), "Elf Warrior");
    }

    #[test]
    fn name_of_only_token_becomes_empty() {
        assert_eq!(clean_name("Token"), "");
        assert_eq!(clean_name("  token "), "");
    }

    #[test]
    fn popularity_type_drops_prefix() {
        let s = OutputSchema::Popularity;
        assert_eq!(clean_type("Token Creature — Angel", s), "Creature — Angel");
        assert_eq!(clean_type("token  Artifact", s), "Artifact");
        assert_eq!(clean_type("Creature — Zombie", s), "Creature — Zombie");
        // Without trailing whitespace there is no prefix to strip.
        assert_eq!(clean_type("Token", s), "Token");
    }

    #[test]
    fn legacy_type_ensures_prefix() {
        let s = OutputSchema::Legacy;
        assert_eq!(clean_type("Creature — Angel", s), "Token Creature — Angel");
        assert_eq!(clean_type("Token Artifact — Clue", s), "Token Artifact — Clue");
        assert_eq!(clean_type("Token", s), "Token");
        assert_eq!(clean_type("token Creature", s), "Token token Creature");
    }

    #[test]
    fn abilities_reminder_text_removed() {
        let input =
            "Flying (This creature can't be blocked except by flying or reach.)  \n Vigilance";
        assert_eq!(clean_abilities(input), "Flying Vigilance");
    }

    #[test]
    fn abilities_cleaning_is_idempotent() {
        let inputs = [
            "Flying (reminder)\nVigilance",
            "((nested) text) remains",
            "Open ( without close",
            "  spaced\t\tout  ",
            "(a)(b)(c)",
            "",
        ];
        for input in inputs {
            let once = clean_abilities(input);
            assert_eq!(clean_abilities(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn abilities_without_parentheses_only_collapse_whitespace() {
        assert_eq!(
            clean_abilities("When this dies,\n\ncreate a 1/1 Spirit."),
            "When this dies, create a 1/1 Spirit."
        );
    }
}

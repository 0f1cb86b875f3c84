use std::num::IntErrorKind;

use super::spec::{GOTO_PREFIX, command_registry, supports_goto};
use super::types::{Command, CommandGrammar};

/// Classifies a console line. `None` means the line is not a command and
/// must be evaluated as code. Matching is exact and case-sensitive.
pub fn parse_command_text(input: &str, grammar: CommandGrammar) -> Option<Command> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(spec) = command_registry(grammar)
        .iter()
        .find(|spec| spec.keyword == trimmed)
    {
        return Command::from_action(spec.action);
    }

    if supports_goto(grammar)
        && let Some(page_text) = trimmed.strip_prefix(GOTO_PREFIX)
    {
        return parse_goto_page(page_text);
    }

    None
}

fn parse_goto_page(page_text: &str) -> Option<Command> {
    // No bounds check here: out-of-range pages are no-ops at transition time.
    let page = match page_text.trim().parse::<i64>() {
        Ok(page) => page,
        // Digits beyond i64 still name a page; it just never exists.
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => return None,
        },
    };
    Some(Command::Goto { page })
}

#[cfg(test)]
mod tests {
    use super::parse_command_text;
    use crate::command::{Command, CommandGrammar};

    #[test]
    fn parses_extended_keywords_and_aliases() {
        let grammar = CommandGrammar::Extended;
        assert_eq!(parse_command_text("next", grammar), Some(Command::Next));
        assert_eq!(parse_command_text("forward", grammar), Some(Command::Next));
        assert_eq!(parse_command_text("prev", grammar), Some(Command::Previous));
        assert_eq!(parse_command_text("back", grammar), Some(Command::Previous));
        assert_eq!(parse_command_text("home", grammar), Some(Command::Restart));
        assert_eq!(parse_command_text("quit", grammar), Some(Command::Restart));
        assert_eq!(parse_command_text("end", grammar), Some(Command::Last));
        assert_eq!(parse_command_text("  last \n", grammar), Some(Command::Last));
    }

    #[test]
    fn goto_carries_unchecked_integer() {
        let grammar = CommandGrammar::Extended;
        assert_eq!(
            parse_command_text("goto 3", grammar),
            Some(Command::Goto { page: 3 })
        );
        assert_eq!(
            parse_command_text("goto 99", grammar),
            Some(Command::Goto { page: 99 })
        );
        assert_eq!(
            parse_command_text("goto -1", grammar),
            Some(Command::Goto { page: -1 })
        );
    }

    #[test]
    fn goto_saturates_integers_beyond_i64() {
        let grammar = CommandGrammar::Extended;
        assert_eq!(
            parse_command_text("goto 99999999999999999999", grammar),
            Some(Command::Goto { page: i64::MAX })
        );
        assert_eq!(
            parse_command_text("goto -99999999999999999999", grammar),
            Some(Command::Goto { page: i64::MIN })
        );
    }

    #[test]
    fn malformed_goto_falls_through_to_evaluation() {
        let grammar = CommandGrammar::Extended;
        assert_eq!(parse_command_text("goto", grammar), None);
        assert_eq!(parse_command_text("goto three", grammar), None);
        assert_eq!(parse_command_text("goto 3 4", grammar), None);
        assert_eq!(parse_command_text("goto3", grammar), None);
    }

    #[test]
    fn matching_is_case_sensitive_and_exact() {
        let grammar = CommandGrammar::Extended;
        assert_eq!(parse_command_text("Next", grammar), None);
        assert_eq!(parse_command_text("next page", grammar), None);
        assert_eq!(parse_command_text("(next)", grammar), None);
        assert_eq!(parse_command_text("", grammar), None);
    }

    #[test]
    fn classic_grammar_has_no_goto_or_aliases() {
        let grammar = CommandGrammar::Classic;
        assert_eq!(parse_command_text("tutorial", grammar), Some(Command::Tutorial));
        assert_eq!(parse_command_text("back", grammar), Some(Command::Previous));
        assert_eq!(parse_command_text("goto 2", grammar), None);
        assert_eq!(parse_command_text("prev", grammar), None);
        assert_eq!(parse_command_text("last", grammar), None);
    }
}

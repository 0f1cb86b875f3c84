use super::types::{ActionId, CommandGrammar, CommandSpec};

pub(crate) const GOTO_PREFIX: &str = "goto ";

const CLASSIC_SPECS: [CommandSpec; 4] = [
    CommandSpec {
        keyword: "tutorial",
        title: "Start Tutorial",
        action: ActionId::Tutorial,
    },
    CommandSpec {
        keyword: "next",
        title: "Next Page",
        action: ActionId::Next,
    },
    CommandSpec {
        keyword: "back",
        title: "Previous Page",
        action: ActionId::Previous,
    },
    CommandSpec {
        keyword: "restart",
        title: "Restart Tutorial",
        action: ActionId::Restart,
    },
];

const EXTENDED_SPECS: [CommandSpec; 12] = [
    CommandSpec {
        keyword: "next",
        title: "Next Page",
        action: ActionId::Next,
    },
    CommandSpec {
        keyword: "forward",
        title: "Next Page",
        action: ActionId::Next,
    },
    CommandSpec {
        keyword: "previous",
        title: "Previous Page",
        action: ActionId::Previous,
    },
    CommandSpec {
        keyword: "prev",
        title: "Previous Page",
        action: ActionId::Previous,
    },
    CommandSpec {
        keyword: "back",
        title: "Previous Page",
        action: ActionId::Previous,
    },
    CommandSpec {
        keyword: "restart",
        title: "First Page",
        action: ActionId::Restart,
    },
    CommandSpec {
        keyword: "reset",
        title: "First Page",
        action: ActionId::Restart,
    },
    CommandSpec {
        keyword: "home",
        title: "First Page",
        action: ActionId::Restart,
    },
    CommandSpec {
        keyword: "quit",
        title: "First Page",
        action: ActionId::Restart,
    },
    CommandSpec {
        keyword: "last",
        title: "Last Page",
        action: ActionId::Last,
    },
    CommandSpec {
        keyword: "end",
        title: "Last Page",
        action: ActionId::Last,
    },
    CommandSpec {
        keyword: "tutorial",
        title: "Start Tutorial",
        action: ActionId::Tutorial,
    },
];

pub fn command_registry(grammar: CommandGrammar) -> &'static [CommandSpec] {
    match grammar {
        CommandGrammar::Classic => &CLASSIC_SPECS,
        CommandGrammar::Extended => &EXTENDED_SPECS,
    }
}

pub fn supports_goto(grammar: CommandGrammar) -> bool {
    matches!(grammar, CommandGrammar::Extended)
}

/// One-line summary of the keywords, for welcome banners.
pub fn keyword_summary(grammar: CommandGrammar) -> String {
    let mut keywords: Vec<&str> = command_registry(grammar)
        .iter()
        .map(|spec| spec.keyword)
        .collect();
    if supports_goto(grammar) {
        keywords.push("goto N");
    }
    keywords.join(", ")
}

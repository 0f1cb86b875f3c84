use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use tokio::io::BufReader;

use tryrepl::app::{App, run_plain};
use tryrepl::command::CommandGrammar;
use tryrepl::config::Config;
use tryrepl::console::Session;
use tryrepl::error::{AppError, AppResult};
use tryrepl::logging::{self, LogSink};
use tryrepl::tutorial::AdvancementPolicy;

#[derive(Debug, Parser)]
#[command(name = "tryrepl", about = "Interactive tutorial console for a remote evaluator")]
struct Cli {
    /// Config file; defaults to the per-user config location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Evaluator URL, e.g. http://localhost:8801/eval.json
    #[arg(long)]
    endpoint: Option<String>,

    /// Command grammar: classic or extended.
    #[arg(long, value_parser = parse_grammar)]
    grammar: Option<CommandGrammar>,

    /// Advancement policy: manual or verify.
    #[arg(long, value_parser = parse_policy)]
    advance: Option<AdvancementPolicy>,

    /// Line-oriented console on stdin/stdout instead of the full-screen UI.
    #[arg(long)]
    plain: bool,

    /// Escape `<`, `>` and line breaks in evaluation output.
    #[arg(long)]
    escape_markup: bool,
}

impl Cli {
    fn load_config(&self) -> AppResult<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load()?,
        };
        Ok(self.apply(config))
    }

    fn apply(&self, mut config: Config) -> Config {
        if let Some(endpoint) = &self.endpoint {
            config.evaluator.endpoint = endpoint.clone();
        }
        if let Some(grammar) = self.grammar {
            config.tutorial.grammar = grammar;
        }
        if let Some(advance) = self.advance {
            config.tutorial.advance = advance;
        }
        if self.escape_markup {
            config.console.escape_markup = true;
        }
        config
    }
}

fn parse_grammar(value: &str) -> Result<CommandGrammar, String> {
    CommandGrammar::parse(value).ok_or_else(|| format!("unknown grammar: {value}"))
}

fn parse_policy(value: &str) -> Result<AdvancementPolicy, String> {
    AdvancementPolicy::parse(value).ok_or_else(|| format!("unknown advancement policy: {value}"))
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    let plain = cli.plain || !std::io::stdin().is_terminal();

    let sink = if plain {
        LogSink::FileOrStderr
    } else {
        LogSink::FileOnly
    };
    logging::init(&config.log, sink)?;

    if plain {
        let mut session = Session::from_config(&config)?;
        let reader = BufReader::new(tokio::io::stdin());
        return run_plain(&mut session, reader, tokio::io::stdout()).await;
    }

    if !std::io::stdout().is_terminal() {
        return Err(AppError::unsupported(
            "full-screen console needs a terminal; use --plain",
        ));
    }
    let mut app = App::new(config)?;
    app.run().await
}

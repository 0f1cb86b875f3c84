use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::command::CommandGrammar;
use crate::error::{AppError, AppResult};
use crate::tutorial::{AdvancementPolicy, Page, VerifyRule};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub evaluator: EvaluatorConfig,
    pub tutorial: TutorialConfig,
    pub console: ConsoleConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub endpoint: String,
    pub method: HttpMethod,
    pub expr_param: String,
    /// 0 waits for the evaluator indefinitely.
    pub timeout_ms: u64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8801/eval.json".to_string(),
            method: HttpMethod::Get,
            expr_param: "expr".to_string(),
            timeout_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TutorialConfig {
    pub grammar: CommandGrammar,
    pub advance: AdvancementPolicy,
    pub pages: Vec<PageConfig>,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            grammar: CommandGrammar::default(),
            advance: AdvancementPolicy::default(),
            pages: (1..=5)
                .map(|n| PageConfig {
                    id: format!("page{n}"),
                    title: Some(format!("Tutorial page {n}")),
                    url: Some(format!("/resources/public/tutorial/page{n}.html")),
                    verify: Some(VerifyRule::Never),
                    ..PageConfig::default()
                })
                .collect(),
        }
    }
}

impl TutorialConfig {
    pub fn build_pages(&self) -> Vec<Page> {
        self.pages.iter().map(PageConfig::to_page).collect()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PageConfig {
    pub id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub body: String,
    pub examples: Vec<String>,
    pub verify: Option<VerifyRule>,
}

impl PageConfig {
    pub fn to_page(&self) -> Page {
        let mut page = Page::new(self.id.clone())
            .with_body(self.body.clone())
            .with_examples(self.examples.iter().cloned());
        if let Some(title) = &self.title {
            page = page.with_title(title.clone());
        }
        if let Some(url) = &self.url {
            page = page.with_url(url.clone());
        }
        if let Some(rule) = &self.verify {
            page = page.with_verify(rule.clone());
        }
        page
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub prompt_label: String,
    pub welcome_message: String,
    pub escape_markup: bool,
    /// Lines starting with this prefix are always evaluated, never navigated.
    pub eval_prefix: Option<String>,
    pub history_capacity: usize,
    /// Scrollback lines kept by the terminal host.
    pub scrollback_capacity: usize,
    pub keymap: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt_label: "Clojure> ".to_string(),
            welcome_message: "Enter some Clojure code, and it will be evaluated.".to_string(),
            escape_markup: false,
            eval_prefix: None,
            history_capacity: 64,
            scrollback_capacity: 1000,
            keymap: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.evaluator.expr_param.trim().is_empty() {
            self.evaluator.expr_param = EvaluatorConfig::default().expr_param;
        }
        for (index, page) in self.tutorial.pages.iter_mut().enumerate() {
            if page.id.trim().is_empty() {
                page.id = format!("page{}", index + 1);
            }
        }
        if self
            .console
            .eval_prefix
            .as_ref()
            .is_some_and(|prefix| prefix.trim().is_empty())
        {
            self.console.eval_prefix = None;
        }
        self.console.history_capacity = self.console.history_capacity.max(1);
        self.console.scrollback_capacity = self.console.scrollback_capacity.max(1);
        if self.log.filter.trim().is_empty() {
            self.log.filter = LogConfig::default().filter;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("TRYREPL_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("tryrepl").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("tryrepl")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("tryrepl").join("config.toml"));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{Config, HttpMethod};
    use crate::command::CommandGrammar;
    use crate::tutorial::{AdvancementPolicy, VerifyRule};

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("tryrepl_config_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn load_from_path_returns_defaults_for_missing_file() {
        let missing = unique_temp_path("missing.toml");
        let config = Config::load_from_path(&missing).expect("missing config should fallback");
        assert_eq!(config, Config::default());
        assert_eq!(config.tutorial.pages.len(), 5);
        assert_eq!(config.tutorial.grammar, CommandGrammar::Extended);
        assert_eq!(config.tutorial.advance, AdvancementPolicy::VerifyAndAdvance);
    }

    #[test]
    fn load_from_path_applies_overrides_and_sanitizes() {
        let path = unique_temp_path("custom.toml");
        fs::write(
            &path,
            r#"
            [evaluator]
            endpoint = "https://try.example.org/eval.json"
            method = "post"
            expr_param = ""

            [tutorial]
            grammar = "classic"
            advance = "manual"

            [[tutorial.pages]]
            id = "intro"
            title = "Hello"
            examples = ["(+ 1 2)"]
            verify = { equals = "3" }

            [[tutorial.pages]]
            verify = "any"

            [console]
            escape_markup = true
            eval_prefix = "  "
            history_capacity = 0
            scrollback_capacity = 0
            "#,
        )
        .expect("config file should be written");

        let config = Config::load_from_path(&path).expect("config should parse");
        assert_eq!(config.evaluator.endpoint, "https://try.example.org/eval.json");
        assert_eq!(config.evaluator.method, HttpMethod::Post);
        assert_eq!(config.evaluator.expr_param, "expr");
        assert_eq!(config.tutorial.grammar, CommandGrammar::Classic);
        assert_eq!(config.tutorial.advance, AdvancementPolicy::Manual);
        assert_eq!(config.tutorial.pages.len(), 2);
        assert_eq!(
            config.tutorial.pages[0].verify,
            Some(VerifyRule::Equals("3".to_string()))
        );
        assert_eq!(config.tutorial.pages[1].id, "page2");
        assert_eq!(config.tutorial.pages[1].verify, Some(VerifyRule::Any));
        assert!(config.console.escape_markup);
        assert_eq!(config.console.eval_prefix, None);
        assert_eq!(config.console.history_capacity, 1);
        assert_eq!(config.console.scrollback_capacity, 1);
        assert_eq!(config.console.prompt_label, "Clojure> ");

        let pages = config.tutorial.build_pages();
        assert_eq!(pages[0].title, "Hello");
        assert_eq!(pages[0].verify("3"), Some(true));
        assert_eq!(pages[1].title, "page2");

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let path = unique_temp_path("broken.toml");
        fs::write(&path, "[tutorial]\ngrammar = \"fancy\"\n").expect("config file should be written");

        assert!(Config::load_from_path(&path).is_err());

        fs::remove_file(&path).expect("config file should be removed");
    }
}

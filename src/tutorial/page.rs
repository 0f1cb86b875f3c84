use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Decides whether a successful evaluation completes a page's exercise.
pub trait VerifyPredicate: Send + Sync {
    fn accepts(&self, value: &str) -> bool;
}

impl<F> VerifyPredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn accepts(&self, value: &str) -> bool {
        self(value)
    }
}

/// Declarative predicates that can be written in the config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerifyRule {
    Never,
    Any,
    Equals(String),
    Contains(String),
}

impl VerifyPredicate for VerifyRule {
    fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Never => false,
            Self::Any => true,
            Self::Equals(expected) => value.trim() == expected.trim(),
            Self::Contains(needle) => value.contains(needle.as_str()),
        }
    }
}

#[derive(Clone)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub body: String,
    pub examples: Vec<String>,
    verify: Option<Arc<dyn VerifyPredicate>>,
}

impl Page {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            url: None,
            body: String::new(),
            examples: Vec::new(),
            verify: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_verify(mut self, predicate: impl VerifyPredicate + 'static) -> Self {
        self.verify = Some(Arc::new(predicate));
        self
    }

    /// `None` when the page has no predicate.
    pub fn verify(&self, value: &str) -> Option<bool> {
        self.verify
            .as_ref()
            .map(|predicate| predicate.accepts(value))
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("url", &self.url)
            .field("examples", &self.examples.len())
            .field("verify", &self.verify.is_some())
            .finish()
    }
}

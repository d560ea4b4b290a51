//! Answering documentation queries against the cached inventories

use crate::cache::{SourceCache, build_tables};
use crate::config::Config;
use crate::error::LookupError;
use crate::fetch::Fetch;
use crate::search::{Evaluation, finder};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::{collections::BTreeMap, sync::Arc};
use url::Url;

/// Public members of `discord.abc.Messageable` (discord.py 2.x).
///
/// Queries naming one of these are pointed at the interface's own entry.
pub const MESSAGEABLE_MEMBERS: &[&str] = &["fetch_message", "history", "pins", "send", "typing"];

lazy_static! {
    static ref NAMESPACE_CHAIN: Regex = Regex::new(r"^(?:[^.\s]+\.)*(.+)$").unwrap();
    static ref TRACKED_PREFIX: Regex =
        Regex::new(r"^(?:discord\.(?:ext\.)?)?(?:commands\.)?(.+)$").unwrap();
}

/// One ranked documentation link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub key: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    /// No query given; the documentation root
    Homepage { url: Url },
    Matches { links: Vec<Link> },
    NoMatch,
}

/// Drop any leading dotted namespace chain, keeping the trailing identifier.
///
/// Only used for the primary source, whose keys are already stripped of
/// their namespaces. `Bot.run` and `Client.run` both answer `x.y.run`.
pub fn normalize_query(raw: &str) -> String {
    first_group(&NAMESPACE_CHAIN, raw.trim())
}

/// Drop a leading `discord.`, `discord.ext.` or `commands.` and keep the
/// rest, so fully qualified names on other sources still match themselves
pub fn strip_tracked_prefix(raw: &str) -> String {
    first_group(&TRACKED_PREFIX, raw.trim())
}

fn first_group(regex: &Regex, text: &str) -> String {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str())
        .to_string()
}

/// Point bare `Messageable` member names at `abc.Messageable.<member>`
pub fn qualify_messageable(query: String) -> String {
    let lowered = query.to_lowercase();
    match MESSAGEABLE_MEMBERS.iter().find(|&&member| member == lowered) {
        Some(member) => format!("abc.Messageable.{}", member),
        None => query,
    }
}

pub struct DocLookup {
    sources: BTreeMap<String, Url>,
    primary_source: String,
    tracked_project: String,
    max_results: usize,
    fetcher: Arc<dyn Fetch>,
    cache: SourceCache,
}

impl DocLookup {
    pub fn new(config: &Config, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            sources: config.sources.clone(),
            primary_source: config.primary_source.clone(),
            tracked_project: config.tracked_project.clone(),
            max_results: config.max_results,
            fetcher,
            cache: SourceCache::new(),
        }
    }

    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    pub fn homepage(&self, source_id: &str) -> Result<&Url, LookupError> {
        self.sources
            .get(source_id)
            .ok_or_else(|| LookupError::UnknownSource(source_id.to_string()))
    }

    /// Build the lookup tables now if no query has done so yet
    pub async fn warm(&self) -> Result<(), LookupError> {
        self.cache
            .get_or_build(|| build_tables(self.fetcher.as_ref(), &self.sources, &self.tracked_project))
            .await?;
        Ok(())
    }

    /// Resolve `raw_query` against `source_id`.
    ///
    /// Without a query the source's documentation root is returned and
    /// nothing is fetched.
    pub async fn answer(
        &self,
        source_id: &str,
        raw_query: Option<&str>,
    ) -> Result<Answer, LookupError> {
        let homepage = self.homepage(source_id)?;

        let Some(raw_query) = raw_query.filter(|q| !q.trim().is_empty()) else {
            return Ok(Answer::Homepage {
                url: homepage.clone(),
            });
        };

        if !self.cache.is_populated() {
            tracing::debug!("building documentation lookup tables");
        }
        self.warm().await?;

        let Some(table) = self.cache.get(source_id) else {
            return Err(LookupError::UnknownSource(source_id.to_string()));
        };

        let query = if source_id == self.primary_source {
            qualify_messageable(normalize_query(raw_query))
        } else {
            strip_tracked_prefix(raw_query)
        };

        let links: Vec<Link> = finder(&query, table.iter(), |&(key, _)| key, Evaluation::Eager)
            .take(self.max_results)
            .map(|(key, url)| Link {
                key: key.to_string(),
                url: url.to_string(),
            })
            .collect();

        tracing::debug!(source = source_id, query = %query, matches = links.len(), "answered lookup");

        if links.is_empty() {
            Ok(Answer::NoMatch)
        } else {
            Ok(Answer::Matches { links })
        }
    }
}

extern crate futures;
extern crate log;
extern crate serde;
extern crate termcolor;
extern crate tokio;

use crate::{
    browser::Launcher,
    contest::{contest_code, contest_name},
    error::{Error, Kind},
    options::Options,
    problem::{problem_codes, problem_links},
    report::{Console, Reporter},
    sample::extract_samples,
    types::{Result, Sample},
};
use futures::{stream, StreamExt};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use termcolor::ColorChoice;
use tokio::time::sleep;

/// Everything extracted from one contest. The three problem vectors are
/// index aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestMetadata {
    pub contest_code: String,
    pub contest_name: String,
    pub problem_links: Vec<String>,
    pub problem_codes: Vec<String>,
    pub problem_samples: Vec<Sample>,
}
impl ContestMetadata {
    pub fn len(&self) -> usize {
        self.problem_links.len()
    }
    pub fn is_empty(&self) -> bool {
        self.problem_links.is_empty()
    }
    pub fn problems(&self) -> impl Iterator<Item = (&str, &str, &[String])> {
        self.problem_links
            .iter()
            .zip(self.problem_codes.iter())
            .zip(self.problem_samples.iter())
            .map(|((link, code), samples)| (link.as_str(), code.as_str(), samples.as_slice()))
    }
}

pub struct ContestExtractor<L: Launcher> {
    contest_link: String,
    launcher: L,
    options: Options,
    reporter: Box<dyn Reporter>,
}
impl<L: Launcher> ContestExtractor<L> {
    pub fn new<T: Into<String>>(contest_link: T, launcher: L) -> Self {
        Self {
            contest_link: contest_link.into(),
            launcher,
            options: Options::default(),
            reporter: Box::new(Console::stderr(ColorChoice::Auto)),
        }
    }
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
    pub fn with_reporter<R: Reporter + 'static>(mut self, reporter: R) -> Self {
        self.reporter = Box::new(reporter);
        self
    }
    pub fn contest_link(&self) -> &str {
        &self.contest_link
    }
    pub fn options(&self) -> &Options {
        &self.options
    }

    async fn resolve_links(&self) -> Result<Vec<String>> {
        let mut attempts = 0;
        loop {
            let links = problem_links(
                &self.launcher,
                &self.contest_link,
                &self.options,
                &*self.reporter,
            )
            .await;
            attempts += 1;
            if !links.is_empty() {
                debug!("Problem links resolved after {} attempts", attempts);
                return Ok(links);
            }
            if self.options.exhausted(attempts) {
                return Err(Error::with_kind(Kind::Attempts(attempts)));
            }
            sleep(self.options.backoff(attempts - 1)).await;
        }
    }

    async fn resolve_samples(&self, links: &[String]) -> Vec<Sample> {
        stream::iter(links.iter())
            .map(|link| {
                extract_samples(
                    &self.launcher,
                    link,
                    &self.options,
                    &*self.reporter,
                )
            })
            .buffered(self.options.workers())
            .collect()
            .await
    }

    pub async fn extract_meta_data(&self) -> Result<ContestMetadata> {
        let contest_code = contest_code(&self.contest_link).to_owned();
        let contest_name = contest_name(
            &self.launcher,
            &self.contest_link,
            &self.options,
            &*self.reporter,
        )
        .await?;
        let problem_links = self.resolve_links().await?;
        let problem_codes = problem_codes(&problem_links);
        info!(
            "Extracting samples of {} problems from {}",
            problem_links.len(),
            contest_code
        );
        let problem_samples = self.resolve_samples(&problem_links).await;
        Ok(ContestMetadata {
            contest_code,
            contest_name,
            problem_links,
            problem_codes,
            problem_samples,
        })
    }
}

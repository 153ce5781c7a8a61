extern crate async_trait;
extern crate chromiumoxide;
extern crate futures;
extern crate log;
extern crate serde_json;
extern crate tempfile;
extern crate tokio;

use super::{Content, Launcher, Selector, Session};
use crate::{
    error::{browser_error, launch_error, Error, Kind},
    types::Result,
};
use async_trait::async_trait;
use chromiumoxide::{
    browser::{Browser, BrowserConfig},
    element::Element,
    Page,
};
use futures::StreamExt;
use log::{debug, warn};
use serde_json::Value;
use std::{
    io,
    path::{Path, PathBuf},
};
use tempfile::TempDir;
use tokio::{sync::Mutex, task::JoinHandle};

/// Launches one headless Chromium process per session.
#[derive(Debug, Clone, Default)]
pub struct Chromium {
    executable: Option<PathBuf>,
    no_sandbox: bool,
}
impl Chromium {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn executable<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.executable = Some(path.into());
        self
    }
    pub fn no_sandbox(mut self, no_sandbox: bool) -> Self {
        self.no_sandbox = no_sandbox;
        self
    }
    /// Fresh user data dir for one browser process. Chrome locks the profile
    /// it runs in.
    fn profile() -> Result<TempDir> {
        tempfile::Builder::new()
            .prefix("cc-extractor-")
            .tempdir()
            .map_err(launch_error)
    }
    fn config(&self, profile: &Path) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder().user_data_dir(profile);
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        if self.no_sandbox {
            builder = builder.no_sandbox();
        }
        builder
            .build()
            .map_err(|e| launch_error(io::Error::new(io::ErrorKind::InvalidInput, e)))
    }
}

#[async_trait]
impl Launcher for Chromium {
    type Session = ChromiumSession;

    async fn launch(&self) -> Result<ChromiumSession> {
        let profile = Self::profile()?;
        let (mut browser, mut handler) = Browser::launch(self.config(profile.path())?)
            .await
            .map_err(launch_error)?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler: {}", e);
                }
            }
        });
        match browser.new_page("about:blank").await {
            Ok(page) => Ok(ChromiumSession {
                browser: Mutex::new(browser),
                page,
                handler,
                profile,
            }),
            Err(e) => {
                if let Err(e) = browser.close().await {
                    warn!("Failed to close browser after launch error: {}", e);
                }
                if let Err(e) = browser.wait().await {
                    warn!("Failed to wait for browser exit: {}", e);
                }
                handler.abort();
                drop(profile);
                Err(launch_error(e))
            }
        }
    }
}

pub struct ChromiumSession {
    browser: Mutex<Browser>,
    page: Page,
    handler: JoinHandle<()>,
    profile: TempDir,
}
impl ChromiumSession {
    async fn elements(&self, selector: &Selector) -> Result<Vec<Element>> {
        let ret = match selector {
            Selector::Class(class) => self.page.find_elements(format!(".{}", class)).await,
            Selector::Tag(tag) => self.page.find_elements(tag.as_str()).await,
            Selector::XPath(path) => self.page.find_xpaths(path.as_str()).await,
        };
        ret.map_err(browser_error)
    }
    async fn content(element: &Element, selector: &Selector, content: Content) -> Result<String> {
        let value = match content {
            Content::InnerHtml => element.inner_html().await.map_err(browser_error)?,
            Content::Property(name) => match element.property(name).await.map_err(browser_error)? {
                Some(Value::String(s)) => Some(s),
                Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            },
        };
        value.ok_or_else(|| Error::with_kind(Kind::Missing(selector.clone(), content)))
    }
}

#[async_trait]
impl Session for ChromiumSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        self.page.goto(url).await.map_err(browser_error)?;
        Ok(())
    }
    async fn exists(&self, selector: &Selector) -> Result<bool> {
        Ok(!self.elements(selector).await?.is_empty())
    }
    async fn read_all(&self, selector: &Selector, content: Content) -> Result<Vec<Result<String>>> {
        let elements = self.elements(selector).await?;
        let mut ret = Vec::with_capacity(elements.len());
        for element in elements.iter() {
            ret.push(Self::content(element, selector, content).await);
        }
        Ok(ret)
    }
    async fn read(&self, selector: &Selector, content: Content) -> Result<String> {
        match self.elements(selector).await?.first() {
            Some(element) => Self::content(element, selector, content).await,
            None => Err(Error::with_kind(Kind::NotFound(selector.clone()))),
        }
    }
    async fn close(self) -> Result<()> {
        let ChromiumSession {
            browser,
            page,
            handler,
            profile,
        } = self;
        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }
        let mut browser = browser.into_inner();
        let ret = browser.close().await.map(|_| ()).map_err(browser_error);
        if let Err(e) = browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        handler.abort();
        debug!("Removing profile {}", profile.path().display());
        drop(profile);
        ret
    }
}

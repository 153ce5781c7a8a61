extern crate async_trait;
extern crate log;
extern crate tokio;

use crate::{
    error::{Error, Kind},
    types::Result,
};
use async_trait::async_trait;
use log::{debug, warn};
use std::{
    cmp::min,
    fmt,
    ops::{Deref, DerefMut},
    time::Duration,
};
use tokio::{
    runtime::Handle,
    time::{sleep_until, timeout_at, Instant},
};

pub mod chromium;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Class(String),
    Tag(String),
    XPath(String),
}
impl Selector {
    pub fn class<T: Into<String>>(name: T) -> Self {
        Self::Class(name.into())
    }
    pub fn tag<T: Into<String>>(name: T) -> Self {
        Self::Tag(name.into())
    }
    pub fn xpath<T: Into<String>>(path: T) -> Self {
        Self::XPath(path.into())
    }
}
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(c) => write!(f, "class `{}`", c),
            Self::Tag(t) => write!(f, "tag `{}`", t),
            Self::XPath(p) => write!(f, "xpath `{}`", p),
        }
    }
}

/// What to read from a located element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Content {
    InnerHtml,
    /// A live DOM property; `href` comes back resolved against the page url.
    Property(&'static str),
}
impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InnerHtml => f.write_str("inner html"),
            Self::Property(name) => write!(f, "property `{}`", name),
        }
    }
}

/// One isolated headless browser session.
#[async_trait]
pub trait Session: Sized + Send + Sync + 'static {
    async fn goto(&mut self, url: &str) -> Result<()>;
    async fn exists(&self, selector: &Selector) -> Result<bool>;
    /// Reads every match in document order. A failed read of one element
    /// does not fail the lookup.
    async fn read_all(&self, selector: &Selector, content: Content) -> Result<Vec<Result<String>>>;
    async fn read(&self, selector: &Selector, content: Content) -> Result<String>;
    async fn close(self) -> Result<()>;
}

#[async_trait]
pub trait Launcher: Send + Sync {
    type Session: Session;
    async fn launch(&self) -> Result<Self::Session>;
}

pub async fn wait_for<S: Session>(
    session: &S,
    selector: &Selector,
    timeout: Duration,
    poll: Duration,
) -> Result<()> {
    let deadline = Instant::now() + timeout;
    loop {
        match timeout_at(deadline, session.exists(selector)).await {
            Ok(Ok(true)) => return Ok(()),
            Ok(Ok(false)) => (),
            Ok(Err(e)) => debug!("Lookup of {} failed: {}", selector, e),
            Err(_) => break,
        }
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        sleep_until(min(now + poll, deadline)).await;
    }
    Err(Error::with_kind(Kind::Timeout(selector.clone(), timeout)))
}

/// Owns a session for one unit of work. `close` releases it; a guard dropped
/// without closing hands the session to the runtime to close.
pub struct Scoped<S: Session> {
    session: Option<S>,
    label: String,
}
impl<S: Session> Scoped<S> {
    pub async fn launch<L>(launcher: &L, label: &str) -> Result<Self>
    where
        L: Launcher<Session = S>,
    {
        debug!("Launching session for {}", label);
        Ok(Self {
            session: Some(launcher.launch().await?),
            label: label.to_owned(),
        })
    }
    pub async fn close(mut self) {
        if let Some(session) = self.session.take() {
            match session.close().await {
                Ok(_) => debug!("Closed session for {}", self.label),
                Err(e) => warn!("Failed to close session for {}: {}", self.label, e),
            }
        }
    }
}
impl<S: Session> Deref for Scoped<S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.session.as_ref().expect("session already closed")
    }
}
impl<S: Session> DerefMut for Scoped<S> {
    fn deref_mut(&mut self) -> &mut S {
        self.session.as_mut().expect("session already closed")
    }
}
impl<S: Session> Drop for Scoped<S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            let label = std::mem::take(&mut self.label);
            match Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        if let Err(e) = session.close().await {
                            warn!("Failed to close dropped session for {}: {}", label, e);
                        }
                    });
                }
                Err(_) => warn!("No runtime to close session for {}", label),
            }
        }
    }
}

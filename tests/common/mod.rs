#![allow(dead_code)]

use async_trait::async_trait;
use cc_extractor::{
    browser::{Content, Launcher, Selector, Session},
    error::{browser_error, Error, Kind},
    types::Result,
};
use std::{
    cmp::{max, min},
    collections::HashMap,
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

/// A rendered page: what every selector matches, `None` being an element
/// whose content cannot be read.
#[derive(Clone, Default)]
pub struct FakePage {
    elements: HashMap<Selector, Vec<Option<String>>>,
    delay: Duration,
}
impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with<S: AsRef<str>>(mut self, selector: Selector, values: &[S]) -> Self {
        self.elements
            .entry(selector)
            .or_insert_with(Vec::new)
            .extend(values.iter().map(|v| Some(v.as_ref().to_owned())));
        self
    }
    pub fn with_unreadable(mut self, selector: Selector) -> Self {
        self.elements
            .entry(selector)
            .or_insert_with(Vec::new)
            .push(None);
        self
    }
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct State {
    pages: HashMap<String, Vec<FakePage>>,
    visits: HashMap<String, usize>,
    launched: usize,
    closed: usize,
    live: usize,
    max_live: usize,
}

/// Serves fake pages by url. A url served several times answers its n-th
/// visit with the n-th page, repeating the last one afterwards.
#[derive(Clone, Default)]
pub struct FakeWeb(Arc<Mutex<State>>);
impl FakeWeb {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn serve(&self, url: &str, page: FakePage) {
        self.0
            .lock()
            .unwrap()
            .pages
            .entry(url.to_owned())
            .or_insert_with(Vec::new)
            .push(page);
    }
    pub fn visits(&self, url: &str) -> usize {
        self.0.lock().unwrap().visits.get(url).copied().unwrap_or(0)
    }
    pub fn launched(&self) -> usize {
        self.0.lock().unwrap().launched
    }
    pub fn closed(&self) -> usize {
        self.0.lock().unwrap().closed
    }
    pub fn live(&self) -> usize {
        self.0.lock().unwrap().live
    }
    pub fn max_live(&self) -> usize {
        self.0.lock().unwrap().max_live
    }
    fn visit(&self, url: &str) -> Option<FakePage> {
        let mut state = self.0.lock().unwrap();
        let visit = state.visits.entry(url.to_owned()).or_insert(0);
        let n = *visit;
        *visit += 1;
        state
            .pages
            .get(url)
            .map(|versions| versions[min(n, versions.len() - 1)].clone())
    }
}

#[async_trait]
impl Launcher for FakeWeb {
    type Session = FakeSession;

    async fn launch(&self) -> Result<FakeSession> {
        {
            let mut state = self.0.lock().unwrap();
            state.launched += 1;
            state.live += 1;
            state.max_live = max(state.max_live, state.live);
        }
        Ok(FakeSession {
            web: self.clone(),
            page: None,
        })
    }
}

pub struct FakeSession {
    web: FakeWeb,
    page: Option<FakePage>,
}
impl FakeSession {
    fn values(&self, selector: &Selector) -> &[Option<String>] {
        self.page
            .as_ref()
            .and_then(|p| p.elements.get(selector))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        let page = self.web.visit(url);
        match page {
            Some(page) => {
                tokio::time::sleep(page.delay).await;
                self.page = Some(page);
                Ok(())
            }
            None => Err(browser_error(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no page at {}", url),
            ))),
        }
    }
    async fn exists(&self, selector: &Selector) -> Result<bool> {
        Ok(!self.values(selector).is_empty())
    }
    async fn read_all(&self, selector: &Selector, content: Content) -> Result<Vec<Result<String>>> {
        Ok(self
            .values(selector)
            .iter()
            .map(|v| {
                v.clone()
                    .ok_or_else(|| Error::with_kind(Kind::Missing(selector.clone(), content)))
            })
            .collect())
    }
    async fn read(&self, selector: &Selector, content: Content) -> Result<String> {
        match self.values(selector).first() {
            Some(Some(v)) => Ok(v.clone()),
            Some(None) => Err(Error::with_kind(Kind::Missing(selector.clone(), content))),
            None => Err(Error::with_kind(Kind::NotFound(selector.clone()))),
        }
    }
    async fn close(self) -> Result<()> {
        let mut state = self.web.0.lock().unwrap();
        state.live -= 1;
        state.closed += 1;
        Ok(())
    }
}

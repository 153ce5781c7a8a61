use crate::browser::{Content, Selector};
use std::{boxed::Box, convert::Into, error::Error as StdError, fmt, time::Duration};

pub(crate) type BoxedError = Box<dyn StdError + Send>;

#[derive(Debug)]
pub struct Error(Box<Inner>);
#[derive(Debug)]
pub enum Kind {
    Launch(BoxedError),
    Browser(BoxedError),
    Timeout(Selector, Duration),
    NotFound(Selector),
    Missing(Selector, Content),
    Attempts(u32),
}
#[derive(Debug)]
struct Inner {
    kind: Kind,
    description: Option<String>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            Kind::Launch(err) => write!(f, "Error launching browser: {}", err)?,
            Kind::Browser(err) => write!(f, "Browser request failed: {}", err)?,
            Kind::Timeout(selector, waited) => write!(
                f,
                "Timed out after {}s waiting for {}",
                waited.as_secs_f32(),
                selector
            )?,
            Kind::NotFound(selector) => write!(f, "No element matches {}", selector)?,
            Kind::Missing(selector, content) => {
                write!(f, "Element {} has no {}", selector, content)?
            }
            Kind::Attempts(count) => {
                write!(f, "No problem links found after {} attempts", count)?
            }
        }
        self.write_description(f)
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.0.kind {
            Kind::Launch(e) | Kind::Browser(e) => Some(e.as_ref()),
            Kind::Timeout(..) | Kind::NotFound(_) | Kind::Missing(..) | Kind::Attempts(_) => None,
        }
    }
}
impl From<Kind> for Error {
    fn from(kind: Kind) -> Self {
        Self::with_kind(kind)
    }
}
impl Error {
    fn new(inner: Inner) -> Self {
        Self(Box::new(inner))
    }
    pub fn with_kind(kind: Kind) -> Self {
        Self::new(Inner {
            kind,
            description: None,
        })
    }
    pub fn with_description<T: Into<String>>(kind: Kind, description: T) -> Self {
        Self::new(Inner {
            kind,
            description: Some(description.into()),
        })
    }
    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }
    pub fn is_timeout(&self) -> bool {
        matches!(self.0.kind, Kind::Timeout(..))
    }
    fn write_description(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(d) = &self.0.description {
            write!(f, ": {}", d)
        } else {
            Ok(())
        }
    }
}

pub fn launch_error<E: StdError + Send + 'static>(err: E) -> Error {
    Error::with_kind(Kind::Launch(Box::new(err)))
}
pub fn browser_error<E: StdError + Send + 'static>(err: E) -> Error {
    Error::with_kind(Kind::Browser(Box::new(err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn timeout_names_selector_and_wait() {
        let err = Error::with_kind(Kind::Timeout(
            Selector::class("breadcrumbs"),
            Duration::from_secs(50),
        ));
        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "Timed out after 50s waiting for class `breadcrumbs`"
        );
    }

    #[test]
    fn description_is_appended() {
        let err = Error::with_description(Kind::NotFound(Selector::tag("a")), "listing empty");
        assert_eq!(err.to_string(), "No element matches tag `a`: listing empty");
        assert!(err.source().is_none());
    }

    #[test]
    fn browser_error_keeps_source() {
        let err = browser_error(io::Error::new(io::ErrorKind::Other, "socket closed"));
        assert_eq!(err.to_string(), "Browser request failed: socket closed");
        assert!(err.source().is_some());
    }
}

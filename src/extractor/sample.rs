extern crate log;
extern crate scraper;

use crate::{
    browser::{wait_for, Content, Launcher, Scoped, Selector, Session},
    config::page::SAMPLE_TABLE_CLASS,
    options::Options,
    report::{Reporter, Status},
    types::{Result, Sample},
};
use log::{debug, warn};
use scraper::Html;

const BLOCK_PREFIX: &str = "/html[1]/body[1]/div[1]/div[1]/div[1]/div[1]/div[1]/div[2]/div[1]/div[1]/div[1]/div[2]/div[1]/div[1]/div[2]/div[1]/div[";
const INPUT_SUFFIX: &str = "]/div[2]/div[1]/pre[1]";
const OUTPUT_SUFFIX: &str = "]/div[2]/div[2]/pre[1]";

/// Problem pages number their sample blocks from one of two offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub first_block: usize,
}
pub const LAYOUTS: [Layout; 2] = [Layout { first_block: 3 }, Layout { first_block: 2 }];

impl Layout {
    pub fn input(&self, index: usize) -> Selector {
        Selector::xpath(format!(
            "{}{}{}",
            BLOCK_PREFIX,
            self.first_block + index,
            INPUT_SUFFIX
        ))
    }
    pub fn output(&self, index: usize) -> Selector {
        Selector::xpath(format!(
            "{}{}{}",
            BLOCK_PREFIX,
            self.first_block + index,
            OUTPUT_SUFFIX
        ))
    }
}

/// `<pre>` inner html to the text it renders.
pub fn decode(inner_html: &str) -> String {
    Html::parse_fragment(inner_html)
        .root_element()
        .text()
        .collect()
}

async fn read_pair<S: Session>(session: &S, layout: &Layout, index: usize) -> Result<(String, String)> {
    let input = session.read(&layout.input(index), Content::InnerHtml).await?;
    let output = session
        .read(&layout.output(index), Content::InnerHtml)
        .await?;
    Ok((decode(&input), decode(&output)))
}

/// Follows the blocks of `layout` until one of them is incomplete.
pub async fn read_layout<S: Session>(session: &S, layout: &Layout) -> Sample {
    let mut ret = Vec::new();
    for index in 0.. {
        match read_pair(session, layout, index).await {
            Ok((input, output)) => {
                ret.push(input);
                ret.push(output);
            }
            Err(e) => {
                debug!(
                    "Layout from block {} stops at sample {}: {}",
                    layout.first_block, index, e
                );
                break;
            }
        }
    }
    ret
}

/// Samples from the first layout, in `LAYOUTS` order, that yields any pair.
/// A page numbered from 3 may still hold `pre` blocks at 2 which are not
/// samples, so the count of pairs cannot pick the layout.
pub async fn read_samples<S: Session>(session: &S) -> Sample {
    for layout in LAYOUTS.iter() {
        let found = read_layout(session, layout).await;
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

async fn fetch<S: Session>(session: &mut S, problem_link: &str, options: &Options) -> Result<Sample> {
    session.goto(problem_link).await?;
    wait_for(
        &*session,
        &Selector::class(SAMPLE_TABLE_CLASS),
        options.wait_timeout,
        options.poll_delay,
    )
    .await?;
    Ok(read_samples(&*session).await)
}

/// Samples of one problem as `[input0, output0, input1, output1, ...]`,
/// empty when the page could not be read.
pub async fn extract_samples<L: Launcher>(
    launcher: &L,
    problem_link: &str,
    options: &Options,
    reporter: &dyn Reporter,
) -> Sample {
    let ret = match Scoped::launch(launcher, problem_link).await {
        Ok(mut session) => {
            let ret = fetch(&mut *session, problem_link, options).await;
            session.close().await;
            ret
        }
        Err(e) => Err(e),
    };
    match ret {
        Ok(samples) => {
            reporter.report(
                Status::Ok,
                "Done",
                &format!("Extracting samples for {}... Done", problem_link),
            );
            samples
        }
        Err(e) => {
            warn!("Extracting samples from {}: {}", problem_link, e);
            reporter.report(
                Status::Error,
                "Error",
                &format!("Error extracting samples from {}", problem_link),
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_address_blocks_from_their_offset() {
        assert_eq!(
            LAYOUTS[0].input(0),
            Selector::xpath(format!("{}3]/div[2]/div[1]/pre[1]", BLOCK_PREFIX))
        );
        assert_eq!(
            LAYOUTS[1].output(2),
            Selector::xpath(format!("{}4]/div[2]/div[2]/pre[1]", BLOCK_PREFIX))
        );
    }

    #[test]
    fn decode_unescapes_entities() {
        assert_eq!(decode("3\n1 &lt; 2\n&amp;x"), "3\n1 < 2\n&x");
    }

    #[test]
    fn decode_keeps_plain_text() {
        assert_eq!(decode("5\n1 2 3 4 5\n"), "5\n1 2 3 4 5\n");
    }
}

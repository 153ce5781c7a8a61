extern crate log;

use crate::{
    browser::{wait_for, Content, Launcher, Scoped, Selector, Session},
    config::page::{ANCHOR_TAG, LISTING_CLASS, PRACTICE_SUBSTRING},
    contest::problems_prefix,
    options::Options,
    report::{Reporter, Status},
    types::Result,
};
use log::{debug, warn};

/// Contest problems live under `<contest>/problems`, practice problems are
/// linked through their submit page.
pub fn is_problem_link(href: &str, prefix: &str) -> bool {
    href.starts_with(prefix) || href.contains(PRACTICE_SUBSTRING)
}

/// Keeps problem links in page order. A link equal to the one kept just
/// before it is skipped; repeats further apart are kept.
pub fn collect_links<I>(hrefs: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut ret: Vec<String> = Vec::new();
    for href in hrefs {
        if !is_problem_link(&href, prefix) {
            continue;
        }
        if ret.last() == Some(&href) {
            continue;
        }
        ret.push(href);
    }
    ret
}

pub fn problem_code(problem_link: &str) -> &str {
    match problem_link.rfind('/') {
        Some(p) => &problem_link[p + 1..],
        None => problem_link,
    }
}

pub fn problem_codes(problem_links: &[String]) -> Vec<String> {
    problem_links
        .iter()
        .map(|l| problem_code(l).to_owned())
        .collect()
}

async fn scan<S: Session>(session: &mut S, contest_link: &str, options: &Options) -> Result<Vec<String>> {
    session.goto(contest_link).await?;
    wait_for(
        &*session,
        &Selector::class(LISTING_CLASS),
        options.wait_timeout,
        options.poll_delay,
    )
    .await?;
    let hrefs = session
        .read_all(&Selector::tag(ANCHOR_TAG), Content::Property("href"))
        .await?
        .into_iter()
        .collect::<Result<Vec<_>>>()?;
    debug!("Found {} anchors on {}", hrefs.len(), contest_link);
    Ok(collect_links(hrefs, &problems_prefix(contest_link)))
}

/// One pass over the problem listing. An empty result means the listing was
/// not readable yet and the scan should be repeated.
pub async fn problem_links<L: Launcher>(
    launcher: &L,
    contest_link: &str,
    options: &Options,
    reporter: &dyn Reporter,
) -> Vec<String> {
    reporter.report(Status::Progress, "Extract", "Extracting problem links...");
    let ret = match Scoped::launch(launcher, contest_link).await {
        Ok(mut session) => {
            let ret = scan(&mut *session, contest_link, options).await;
            session.close().await;
            ret
        }
        Err(e) => Err(e),
    };
    match ret {
        Ok(links) if !links.is_empty() => {
            reporter.report(Status::Ok, "Done", "Extracting problem links... Done");
            links
        }
        Ok(_) => {
            debug!("No problem links on {}", contest_link);
            reporter.report(Status::Error, "Retry", "Attempt to Extract failed. Retrying...");
            Vec::new()
        }
        Err(e) => {
            warn!("Scanning problem links of {}: {}", contest_link, e);
            reporter.report(Status::Error, "Retry", "Attempt to Extract failed. Retrying...");
            Vec::new()
        }
    }
}

extern crate log;

use crate::{
    browser::{wait_for, Content, Launcher, Scoped, Selector, Session},
    config::page::{BREADCRUMB_CLASS, PROBLEMS_SUFFIX},
    options::Options,
    report::{Reporter, Status},
    types::Result,
};
use log::debug;

fn after_last_slash(s: &str) -> &str {
    match s.rfind('/') {
        Some(p) => &s[p + 1..],
        None => s,
    }
}

/// `https://<host>/<code>?<query>` and `https://<host>/<code>` both give `<code>`.
pub fn contest_code(contest_link: &str) -> &str {
    match contest_link.find('?') {
        Some(q) => after_last_slash(&contest_link[..q]),
        None => after_last_slash(contest_link),
    }
}

pub fn problems_prefix(contest_link: &str) -> String {
    let base = match contest_link.find('?') {
        Some(q) => &contest_link[..q],
        None => contest_link,
    };
    format!("{}{}", base, PROBLEMS_SUFFIX)
}

/// The breadcrumb's entries are separated by escaped `>`, so the contest is
/// whatever follows the last `;`.
pub fn breadcrumb_name(inner_html: &str) -> String {
    match inner_html.rfind(';') {
        Some(p) => inner_html[p + 1..].trim().to_owned(),
        None => inner_html.trim().to_owned(),
    }
}

async fn read_name<S: Session>(session: &mut S, contest_link: &str, options: &Options) -> Result<String> {
    session.goto(contest_link).await?;
    let breadcrumb = Selector::class(BREADCRUMB_CLASS);
    wait_for(
        &*session,
        &breadcrumb,
        options.wait_timeout,
        options.poll_delay,
    )
    .await?;
    let inner = session.read(&breadcrumb, Content::InnerHtml).await?;
    debug!("Breadcrumb of {}: {:?}", contest_link, inner);
    Ok(breadcrumb_name(&inner))
}

pub async fn contest_name<L: Launcher>(
    launcher: &L,
    contest_link: &str,
    options: &Options,
    reporter: &dyn Reporter,
) -> Result<String> {
    reporter.report(Status::Progress, "Extract", "Extracting contest name...");
    let mut session = Scoped::launch(launcher, contest_link).await?;
    let ret = read_name(&mut *session, contest_link, options).await;
    session.close().await;
    let name = ret?;
    reporter.report(Status::Ok, "Done", "Extracting contest name... Done");
    reporter.report(Status::Info, "Contest", &format!("Contest Name: {}", name));
    Ok(name)
}

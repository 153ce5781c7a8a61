pub mod wait {
    use std::time::Duration;
    pub const TIMEOUT: Duration = Duration::from_secs(50);
    pub const POLL_DELAY: Duration = Duration::from_millis(250);
}
pub mod pool {
    pub const WORKERS: usize = 5;
}
pub mod retry {
    use std::time::Duration;
    pub const LINK_DELAY: Duration = Duration::from_secs(1);
    pub const MAX_LINK_DELAY: Duration = Duration::from_secs(30);
}
pub mod page {
    pub const BREADCRUMB_CLASS: &str = "breadcrumbs";
    pub const LISTING_CLASS: &str = "dataTable";
    pub const SAMPLE_TABLE_CLASS: &str = "_input_output__table_lulsq_184";
    pub const ANCHOR_TAG: &str = "a";
    pub const PROBLEMS_SUFFIX: &str = "/problems";
    pub const PRACTICE_SUBSTRING: &str = "/submit/";
}

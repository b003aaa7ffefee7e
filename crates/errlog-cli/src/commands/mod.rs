pub mod list;
pub mod stat;

use errlog_config::ConfigError;
use errlog_core::{ErrlogError, StatsOrder};
use errlog_engine::StatsFilter;

/// Errors that end a run with a non-zero exit status.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Run(#[from] ErrlogError),
}

/// Resolved settings for `error-stat`.
#[derive(Debug, Clone)]
pub struct StatOptions {
    pub filter: StatsFilter,
    pub order: StatsOrder,
    pub placeholder: String,
}

#[cfg(test)]
pub(crate) const SAMPLE_LOG: &str = r#"2021/05/10 12:00:01 [error] 1234#0: *55 open() "/var/www/site/404.html" failed (2: No such file), client: 10.0.0.1, server: example.com, request: "GET /x HTTP/1.1", host: a.com
2021/05/10 12:00:02 [error] 1234#0: *56 open() "/var/www/site/favicon.ico" failed (2: No such file), client: 10.0.0.2, server: example.com, request: "GET /favicon.ico HTTP/1.1", host: b.com
2021/05/10 12:00:03 [warn] 1234#0: *57 an upstream response is buffered to a temporary file /var/cache/nginx/proxy_temp/1/00/0000000001 while reading upstream, client: 10.0.0.3, server: api.example.com, request: "POST /upload HTTP/1.1", host: a.com
not an nginx line
2021/05/10 12:00:04 [error] 1234#0: *58 open() "/var/www/site/robots.txt" failed (2: No such file), client: 10.0.0.1, server: example.com, request: "GET /robots.txt HTTP/1.1", host: a.com
"#;

mod app;
mod args;
mod config;
mod domain;
mod entry;
mod error;
mod http;
mod metrics;
mod report;
mod session;
mod system;
#[cfg(test)]
mod test_support;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}

use console::style;
use env_logger::{Builder, Env};
use log::Level;
use std::io::Write;

/// Default filter: relayed stderr is compared verbatim, so only errors that
/// never reach the relay sinks are shown unless `--verbose` or `RUST_LOG`
/// asks for more.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "error" }
}

/// Initialize logger; `RUST_LOG` takes precedence over the verbose flag.
pub fn init_logger(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));

    Builder::from_env(env)
        .format(|buf, record| {
            let level = match record.level() {
                Level::Error => style("ERROR").red().bold(),
                Level::Warn => style("WARN ").yellow().bold(),
                Level::Info => style("INFO ").green(),
                Level::Debug => style("DEBUG").cyan(),
                Level::Trace => style("TRACE").dim(),
            };
            writeln!(buf, "{} [{}] {}", level, record.target(), record.args())
        })
        .init();
}

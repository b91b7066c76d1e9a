use env_logger::Env;

/// Overrides the level chosen by `--verbose`.
const LOG_ENV: &str = "CLASH_TOOLS_LOG";

/// Logs go to stderr so `proxy` output stays safe to `eval`.
pub(crate) fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(Env::new().filter_or(LOG_ENV, default_level))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

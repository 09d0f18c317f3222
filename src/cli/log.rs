use std::env::VarError;

use log::LevelFilter;

pub const GQT_LOG: &str = "GQT_LOG";

/// Install the global logger.
///
/// `--verbose` and `--quiet` take precedence over [`GQT_LOG`]; with neither
/// flag nor variable only warnings and errors are shown.
pub fn init_logger(verbose: bool, quiet: bool, env_log_level: Result<String, VarError>) {
    if env_log_level.is_ok() && (verbose || quiet) {
        let flag = if verbose { "--verbose" } else { "--quiet" };
        eprintln!("{GQT_LOG} and the {flag} flag are set. The {flag} flag takes precedence over {GQT_LOG}.");
    }

    match env_log_level {
        Ok(level) if !verbose && !quiet => {
            let level = level.to_lowercase();
            // module paths only on debug and trace levels
            let print_module_path = level.contains("debug") || level.contains("trace");
            env_logger::Builder::from_env(env_logger::Env::default().filter(GQT_LOG))
                .format_timestamp(None)
                .format_module_path(print_module_path)
                .init()
        }
        _ => {
            let level = match (verbose, quiet) {
                (true, _) => LevelFilter::Trace,
                (false, true) => LevelFilter::Error,
                (false, false) => LevelFilter::Warn,
            };
            env_logger::builder()
                .filter_level(level)
                .format_timestamp(None)
                .format_module_path(verbose)
                .init()
        }
    }
}

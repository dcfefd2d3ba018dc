//! Decides whether a rule set applies to a feed context.
//!
//! Contexts are free-form labels ("home", "groups", ...) chosen by
//! whoever embeds the engine. An empty `runOn` map applies everywhere;
//! otherwise a context must be listed and switched on.

use feed_model::Config;
use tracing::warn;

pub fn should_run(config: &Config, context: &str) -> bool {
    if config.run_on.is_empty() {
        return true;
    }

    match config.run_on.get(context) {
        Some(enabled) => *enabled,
        None => {
            warn!(context, "Feed context not listed in runOn; skipping");
            false
        }
    }
}

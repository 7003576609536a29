use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the stderr subscriber once per process.
///
/// Levels come from `CLIMATE_LOG` (e.g. `CLIMATE_LOG=climate_action_planner=debug`),
/// falling back to `climate_action_planner=info`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("CLIMATE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("climate_action_planner=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "romcrc=debug,romcrc_cli=debug"
    } else {
        "romcrc=info,romcrc_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

//! Terminal session over the Clashes search pipeline.
//!
//! Each stdin line replaces the search box contents. Commands:
//! `:clear`, `:retry`, `:back`, `:forward`, `:quit`.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use clashes_client_lib::history::location_for;
use clashes_client_lib::session::{Command, Session};
use clashes_client_lib::source::HttpSource;
use clashes_client_lib::view::ListView;
use clashes_client_lib::{ClashesHook, ClientConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("clashes=info,clashes_client_lib=info,warn"));

    // stdout belongs to the rendered list.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = ClientConfig::from_env();
    info!(?config, "Starting Clashes terminal client");

    let source = HttpSource::new(&config.api_url)?;
    info!(url = %source.clashes_url(), "Using REST accessor");
    let hook = ClashesHook::new(Arc::new(source));

    // Re-render on every state change.
    let mut rx = hook.subscribe();
    let render = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if !state.loading {
                println!("→ {}", location_for(&state.term));
            }
            println!("{}", ListView::from_state(&state).render_text());
        }
    });

    let mut session = Session::new(hook, config.debounce);

    let init = session.hook().clone();
    tokio::spawn(async move {
        init.initialize().await;
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = Command::parse(&line);
        if command == Command::Quit {
            break;
        }
        if let Some(notice) = session.handle(command) {
            println!("{notice}");
        }
    }

    drop(session);
    render.abort();
    info!("Bye");
    Ok(())
}

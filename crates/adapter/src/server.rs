//! TCP session server
//!
//! Every accepted connection is a player session: the peer sends shape lines,
//! the server answers with action lines. Sessions run the blocking search on
//! tokio's blocking pool so one slow game never stalls the accept loop.

use std::io::BufReader;
use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tracing::{info, warn};

use blockfall_engine::{HeuristicChooser, SearchConfig};

use crate::config::GameConfig;
use crate::session::{self, SessionSummary};

/// Start the TCP server; `ready_tx` receives the bound address.
pub async fn run_server(
    config: GameConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let search = config.search_config()?;

    let listener = TcpListener::bind(config.socket_addr()?).await?;
    let bound = listener.local_addr()?;
    info!(%bound, "session server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %addr, "client connected");

        let config = config.clone();
        let search = search.clone();
        tokio::spawn(async move {
            match handle_client(socket, config, search).await {
                Ok(summary) => info!(
                    client_id,
                    reason = ?summary.reason,
                    score = summary.score,
                    "client disconnected"
                ),
                Err(e) => warn!(client_id, error = %e, "client session failed"),
            }
        });
    }
}

/// Run one player session over `socket` on the blocking pool
async fn handle_client(
    socket: TcpStream,
    config: GameConfig,
    search: SearchConfig,
) -> anyhow::Result<SessionSummary> {
    let stream = socket.into_std()?;
    stream.set_nonblocking(false)?;
    let reader = BufReader::new(stream.try_clone()?);

    let summary = tokio::task::spawn_blocking(move || {
        session::play(reader, stream, config.board(), HeuristicChooser::new(search))
    })
    .await??;
    Ok(summary)
}

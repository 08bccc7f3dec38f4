use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use super::{CliService, formatting::format_error};

/// Serves operator command lines from `input` until it closes or `exit` is read.
///
/// Each line is answered on `output`: the command's response (nothing for an
/// empty one), or a failure line carrying the command's negative errno.
///
/// # Errors
/// Returns an I/O error if reading a line or writing a response fails.
#[instrument(skip_all)]
pub async fn run_shell<R, W>(service: &CliService, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if matches!(line, "exit" | "quit") {
            break;
        }

        let reply = match service.execute_line(line).await {
            Ok(response) if response.is_empty() => continue,
            Ok(response) => response,
            Err(e) => {
                debug!(command = line, code = e.code(), error = %e, "Command failed");
                format_error(&format!("{e} ({})", e.code()))
            }
        };

        output.write_all(reply.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }

    debug!("Operator shell closed");
    Ok(())
}

/// Serves the console until `shutdown` resolves.
///
/// The console closing (EOF, `exit`, or an I/O error) only stops command
/// handling; the modem keeps running until `shutdown` completes. A daemon
/// started with stdin at `/dev/null` therefore stays up.
pub async fn serve_console<R, W, S>(service: &CliService, input: R, output: W, shutdown: S)
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    tokio::select! {
        () = &mut shutdown => return,
        result = run_shell(service, input, output) => match result {
            Ok(()) => info!("Console closed, commands no longer accepted"),
            Err(e) => warn!(error = %e, "Console failed, commands no longer accepted"),
        },
    }

    shutdown.await;
}

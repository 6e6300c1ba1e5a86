use futures::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_stream::wrappers::SplitStream;
use tower::{Service, ServiceExt};

use crate::api::router::{ApiRequest, WellnessService};
use crate::error::AppError;

/// Serves one JSON request per input line and writes one JSON response per
/// output line until the input closes. Lines that are not UTF-8 or not a
/// known request get an `{"error": ...}` reply; only I/O failures end the loop.
pub async fn serve_lines<R, W>(
    reader: R,
    mut writer: W,
    mut service: WellnessService,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = SplitStream::new(reader.split(b'\n'));

    while let Some(line) = lines.next().await {
        let reply = match String::from_utf8(line?) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<ApiRequest>(line) {
                    Ok(request) => {
                        let response = service.ready().await?.call(request).await?;
                        serde_json::to_string(&response)?
                    }
                    Err(e) => rejected(e.to_string()),
                }
            }
            Err(e) => rejected(format!("request is not valid UTF-8: {e}")),
        };

        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

fn rejected(message: String) -> String {
    tracing::warn!("Rejected request: {}", message);
    serde_json::json!({ "error": message }).to_string()
}

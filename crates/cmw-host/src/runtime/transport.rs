use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use cmw_app::WizardSession;
use cmw_core::InboundHostMessage;

use crate::commands::{self, WidgetCommand};
use crate::events::{OutboundFrame, WidgetEvent};

/// Serve one session over newline-delimited JSON.
///
/// Inbound lines are host messages when their `type` is a known host type,
/// otherwise widget commands. Outbound frames are written one per line.
/// End of input unmounts the session.
pub async fn run_transport<R, W>(
    session: WizardSession,
    outbound_tx: mpsc::UnboundedSender<OutboundFrame>,
    outbound_rx: mpsc::UnboundedReceiver<OutboundFrame>,
    reader: R,
    writer: W,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let writer_task = tokio::spawn(write_frames(writer, outbound_rx, shutdown_rx));

    let read_result = read_lines(&session, &outbound_tx, reader).await;

    info!("input closed, unmounting wizard");
    session.unmount().await;
    let _ = shutdown_tx.send(());

    let write_result = writer_task.await?;
    read_result?;
    write_result?;
    Ok(())
}

async fn read_lines<R>(
    session: &WizardSession,
    outbound_tx: &mpsc::UnboundedSender<OutboundFrame>,
    reader: R,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        route_line(session, outbound_tx, line).await;
    }
    Ok(())
}

async fn route_line(
    session: &WizardSession,
    outbound_tx: &mpsc::UnboundedSender<OutboundFrame>,
    line: &str,
) {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "ignoring malformed input line");
            return;
        }
    };

    let is_host_message = value
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| InboundHostMessage::KNOWN_TYPES.contains(&kind));
    if is_host_message {
        if let Err(err) = session.receive_host_message(&value).await {
            debug!(error = %err, "host message ignored");
        }
        return;
    }

    let Some(command_name) = value.get("command").and_then(Value::as_str).map(str::to_owned)
    else {
        debug!("ignoring message that is neither a host message nor a command");
        return;
    };

    let result = match serde_json::from_value::<WidgetCommand>(value) {
        Ok(command) => commands::execute(session, command).await,
        Err(err) => Err(err.to_string()),
    };

    if let Err(message) = result {
        warn!(command = %command_name, error = %message, "command rejected");
        let _ = outbound_tx.send(OutboundFrame::Widget(WidgetEvent::CommandError {
            command: command_name,
            message,
        }));
    }
}

async fn write_frames<W>(
    mut writer: W,
    mut frames: mpsc::UnboundedReceiver<OutboundFrame>,
    mut shutdown: oneshot::Receiver<()>,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            frame = frames.recv() => match frame {
                Some(frame) => write_frame(&mut writer, &frame).await?,
                None => break,
            },
            _ = &mut shutdown => {
                while let Ok(frame) = frames.try_recv() {
                    write_frame(&mut writer, &frame).await?;
                }
                break;
            }
        }
    }
    writer.flush().await
}

async fn write_frame<W>(writer: &mut W, frame: &OutboundFrame) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = match serde_json::to_vec(frame) {
        Ok(line) => line,
        Err(err) => {
            warn!(error = %err, "failed to encode outbound frame");
            return Ok(());
        }
    };
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await
}

use std::{io::Write, process::Stdio};

use radi_model::{OperationContext, OutputStream};
use tokio::{io::AsyncReadExt, process::Command};
use tracing::{debug, trace};

use crate::{ExecError, ExecResult};

/// Run `binary` with `args` until it exits or `ctx` ends.
///
/// With an `output` sink the child's stdout is piped into it; otherwise stdout is inherited.
/// Stderr is always inherited. On cancellation or deadline the child is killed.
pub async fn run_child(
    binary: &str,
    args: &[String],
    ctx: &OperationContext,
    output: Option<&OutputStream>,
) -> ExecResult<()> {
    if ctx.is_cancelled() {
        return Err(ended(ctx));
    }
    trace!(binary, ?args, "spawning subprocess");

    let mut cmd = Command::new(binary);
    cmd.args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);
    cmd.stdout(match output {
        Some(_) => Stdio::piped(),
        None => Stdio::inherit(),
    });

    let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
        binary: binary.to_string(),
        source,
    })?;
    let stdout = child.stdout.take();
    let sink = output.cloned();

    let run = async {
        if let (Some(mut out), Some(mut sink)) = (stdout, sink) {
            let mut buf = [0u8; 8192];
            loop {
                let n = out.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                sink.write_all(&buf[..n])?;
            }
            sink.flush()?;
        }
        child.wait().await
    };

    tokio::select! {
        res = run => {
            let status = res?;
            match status.code() {
                Some(0) => {
                    debug!(binary, "subprocess exited successfully");
                    Ok(())
                }
                Some(code) => Err(ExecError::Failed(code)),
                None => Err(ExecError::Terminated),
            }
        }
        _ = ctx.cancelled() => {
            debug!(binary, "context ended; killing subprocess");
            if let Err(e) = child.kill().await {
                debug!(binary, "failed to kill subprocess: {e}");
            }
            Err(ended(ctx))
        }
    }
}

fn ended(ctx: &OperationContext) -> ExecError {
    if ctx.token().is_cancelled() {
        ExecError::Cancelled
    } else {
        ExecError::DeadlineExceeded
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Duration;

    use radi_model::{MemoryStreams, Streams};

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn stdout_is_piped_into_sink() {
        let streams = MemoryStreams::default();
        let ctx = OperationContext::background();

        run_child("echo", &args(&["hello"]), &ctx, Some(&streams.stdout()))
            .await
            .unwrap();

        assert_eq!(streams.stdout_contents(), b"hello\n");
    }

    #[tokio::test]
    async fn non_zero_exit_is_reported() {
        let ctx = OperationContext::background();
        let err = run_child("sh", &args(&["-c", "exit 3"]), &ctx, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Failed(3)));
    }

    #[tokio::test]
    async fn missing_binary_is_spawn_error() {
        let ctx = OperationContext::background();
        let err = run_child("radi-no-such-binary", &[], &ctx, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Spawn { ref binary, .. } if binary == "radi-no-such-binary"));
    }

    #[tokio::test]
    async fn deadline_kills_child() {
        let ctx = OperationContext::with_timeout(Duration::from_millis(100));
        let err = run_child("sleep", &args(&["5"]), &ctx, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn explicit_cancel_kills_child() {
        let ctx = OperationContext::background();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let err = run_child("sleep", &args(&["5"]), &ctx, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Cancelled));
    }

    #[tokio::test]
    async fn already_cancelled_context_never_spawns() {
        let ctx = OperationContext::background();
        ctx.cancel();
        let err = run_child("radi-no-such-binary", &[], &ctx, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Cancelled));
    }
}

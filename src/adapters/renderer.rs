use crate::core::{PdfRenderer, RenderJob};
use crate::utils::error::{PdfError, Result};
use std::ffi::OsString;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs the WeasyPrint command-line program with the HTML on stdin.
#[derive(Debug, Clone)]
pub struct WeasyPrintRenderer {
    command: String,
    extra_args: Vec<String>,
}

impl WeasyPrintRenderer {
    pub fn new(command: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            extra_args,
        }
    }

    /// `[extra args] -s <style>... -u <base-url> - <target>`
    pub fn arguments(&self, job: &RenderJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.extra_args.iter().map(OsString::from).collect();

        for stylesheet in &job.stylesheets {
            args.push("-s".into());
            args.push(stylesheet.clone().into_os_string());
        }
        args.push("-u".into());
        args.push(job.base_url.clone().into());
        args.push("-".into());
        args.push(job.target.clone().into_os_string());

        args
    }
}

#[async_trait::async_trait]
impl PdfRenderer for WeasyPrintRenderer {
    fn name(&self) -> &str {
        &self.command
    }

    async fn render(&self, job: &RenderJob) -> Result<()> {
        let args = self.arguments(job);
        tracing::debug!("Running {} {:?}", self.command, args);

        let mut child = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| PdfError::RendererSpawnError {
                command: self.command.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        let feed = async move {
            match stdin {
                Some(mut stdin) => stdin.write_all(job.html.as_bytes()).await,
                None => Ok(()),
            }
        };

        // stderr is drained while stdin is written so neither pipe can fill up.
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        // The renderer may exit before reading everything; its status tells us why.
        if let Err(e) = fed {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(PdfError::RendererFailedError {
                command: self.command.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }

        if !stderr.is_empty() {
            tracing::warn!("{}: {}", self.command, stderr);
        }

        Ok(())
    }
}

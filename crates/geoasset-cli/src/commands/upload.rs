//! Upload command - replace a company's assets from a JSON file

use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use geoasset_client::AssetClient;
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::OutputContext;

/// Upload an asset file for a company
///
/// If the company already has assets and `yes` is not set, asks before
/// replacing them.
pub async fn upload(
    client: &AssetClient,
    company_id: &str,
    file_path: &Path,
    yes: bool,
    ctx: &OutputContext,
) -> Result<()> {
    let metadata = tokio::fs::metadata(file_path)
        .await
        .with_context(|| format!("Cannot read asset file: {}", file_path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Not a file: {}", file_path.display());
    }

    let exists = client
        .company_has_assets(company_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to check existing assets: {}", e.user_message()))?;
    tracing::debug!(company_id, exists, "Checked for existing assets");

    if exists && !yes {
        let prompt = format!(
            "Company '{}' already has assets. They will be replaced. Continue? [y/N] ",
            company_id
        );
        let confirmed = tokio::task::spawn_blocking(move || {
            let stdin = std::io::stdin();
            confirm(&prompt, &mut stdin.lock(), &mut std::io::stderr())
        })
        .await??;

        if !confirmed {
            ctx.warn("Upload cancelled");
            return Ok(());
        }
    }

    let pb = if ctx.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Uploading {}...", file_path.display()));

    let result = client.upload_file(company_id, file_path).await;
    pb.finish_and_clear();

    let response = result.map_err(|e| anyhow::anyhow!("Upload failed: {}", e.user_message()))?;

    ctx.success(&format!("Successfully uploaded {} assets", response.count));
    Ok(())
}

/// Ask a yes/no question; anything but an explicit yes is a no
fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> std::io::Result<bool> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("  YES \r\n"));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn test_confirm_writes_prompt() {
        let mut input = Cursor::new(b"yes\n".to_vec());
        let mut output = Vec::new();

        assert!(confirm("Replace? ", &mut input, &mut output).unwrap());
        assert_eq!(output, b"Replace? ");
    }

    #[test]
    fn test_confirm_eof_is_no() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();

        assert!(!confirm("Replace? ", &mut input, &mut output).unwrap());
    }
}

//! Watch command - follow asset changes via SSE

use anyhow::Result;
use geoasset_client::AssetClient;

use crate::output::{event_line, OutputContext, OutputFormat};

/// Print one line per store change until the stream ends or Ctrl+C
pub async fn watch(client: &AssetClient, company: Option<&str>, ctx: &OutputContext) -> Result<()> {
    let mut feed = client.watch(company).await?;

    match company {
        Some(id) => ctx.info(&format!("Watching asset changes for {}...", id)),
        None => ctx.info("Watching asset changes..."),
    }
    ctx.info("Press Ctrl+C to stop");

    if ctx.format == OutputFormat::Csv {
        println!("event,companyId,count");
    }

    loop {
        tokio::select! {
            event = feed.next_event() => {
                match event {
                    Some(Ok(event)) => println!("{}", event_line(&event, ctx.format)),
                    Some(Err(e)) => {
                        ctx.error(&format!("Stream error: {}", e));
                        break;
                    }
                    None => {
                        ctx.info("Stream ended");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                ctx.info("\nStopped");
                break;
            }
        }
    }

    Ok(())
}

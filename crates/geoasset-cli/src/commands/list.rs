//! List command - show stored assets

use anyhow::Result;
use geoasset_client::AssetClient;

use crate::output::{AssetRow, OutputContext};

/// List all assets, or those of one company
pub async fn list(client: &AssetClient, company: Option<&str>, ctx: &OutputContext) -> Result<()> {
    let assets = client.list_assets(company).await?;

    let rows: Vec<AssetRow> = assets.into_iter().map(AssetRow::from).collect();

    ctx.print(&rows, "No assets found");
    Ok(())
}

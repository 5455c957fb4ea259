use anyhow::Result;

use super::commands::ProbeArgs;
use super::context::CliContext;
use super::output::{emit, OutputFormat};

pub async fn cmd_probe(args: ProbeArgs, ctx: &CliContext, format: OutputFormat) -> Result<()> {
    let page = ctx.open(&args.page).await?;
    let probed = page.autoweb.probe(&args.identifier).await;
    page.close().await;

    let diagnostics = probed?;
    emit(format, &diagnostics, || diagnostics.lines())
}

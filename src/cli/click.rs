use anyhow::Result;
use autoweb_core_types::ElementDescriptor;
use tool_click::ClickReport;

use super::commands::{ClickArgs, ClickUrlArgs};
use super::context::CliContext;
use super::output::{emit, OutputFormat};

/// Returns whether the click succeeded; the caller turns it into the exit code.
pub async fn cmd_click(args: ClickArgs, ctx: &CliContext, format: OutputFormat) -> Result<bool> {
    let mut descriptor = ElementDescriptor::new(args.identifier);
    if let Some(title) = &args.title {
        descriptor = descriptor.with_title(title);
    }

    let page = ctx.open(&args.page).await?;
    let report = page.autoweb.click_element(descriptor).await;
    page.close().await;
    print_report(&report, format)
}

pub async fn cmd_click_url(args: ClickUrlArgs, ctx: &CliContext, format: OutputFormat) -> Result<bool> {
    let page = ctx.open(&args.page).await?;
    let report = page.autoweb.click_url(&args.target).await;
    page.close().await;
    print_report(&report, format)
}

fn print_report(report: &ClickReport, format: OutputFormat) -> Result<bool> {
    emit(format, report, || vec![report.tagged()])?;
    Ok(report.ok)
}

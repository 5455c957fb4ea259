use anyhow::Result;
use autoweb_core_types::ElementSnapshot;

use super::commands::{PageArgs, ScanElementsArgs};
use super::context::CliContext;
use super::output::{emit, OutputFormat};

pub async fn cmd_scan_elements(
    args: ScanElementsArgs,
    ctx: &CliContext,
    format: OutputFormat,
) -> Result<()> {
    let page = ctx.open(&args.page).await?;
    let scanned = page.autoweb.scan_elements().await;
    page.close().await;

    let mut elements = scanned?;
    if args.visible_only {
        elements.retain(|element| element.is_visible);
    }
    emit(format, &elements, || elements.iter().map(element_line).collect())
}

pub async fn cmd_scan_urls(args: PageArgs, ctx: &CliContext, format: OutputFormat) -> Result<()> {
    let page = ctx.open(&args).await?;
    let scanned = page.autoweb.scan_urls().await;
    page.close().await;

    let urls = scanned?;
    emit(format, &urls, || urls.clone())
}

fn element_line(element: &ElementSnapshot) -> String {
    format!(
        "{:<32} {:<20} ({},{}) {}x{} {}",
        element.identifier,
        element.title,
        element.x,
        element.y,
        element.width,
        element.height,
        if element.is_visible { "visible" } else { "hidden" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoweb_core_types::Rect;

    #[test]
    fn element_line_reports_position_and_visibility() {
        let element = ElementSnapshot::from_rect("#buy-btn", "Buy", &Rect::new(30.0, 30.0, 40.0, 40.0), true);
        let line = element_line(&element);
        assert!(line.starts_with("#buy-btn"));
        assert!(line.contains("(50,50) 40x40 visible"));
    }
}

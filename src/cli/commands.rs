use clap::{Args, Subcommand};

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List elements that carry an id or a class
    ScanElements(ScanElementsArgs),

    /// List every URL referenced by the page
    ScanUrls(PageArgs),

    /// Click an element by identifier, scrolling it into view first
    Click(ClickArgs),

    /// Click the first link pointing at a URL
    ClickUrl(ClickUrlArgs),

    /// Show how an identifier resolves, strategy by strategy
    Probe(ProbeArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct PageArgs {
    /// Load this URL before acting
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct ScanElementsArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Only report elements inside the viewport
    #[arg(long)]
    pub visible_only: bool,
}

#[derive(Args, Clone, Debug)]
pub struct ClickArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// `#id`, `.class` or a bare identifier
    #[arg(long)]
    pub identifier: String,

    /// Title used to pick among several matches
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct ClickUrlArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Link target; fragments are ignored when matching
    pub target: String,
}

#[derive(Args, Clone, Debug)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub page: PageArgs,

    pub identifier: String,
}

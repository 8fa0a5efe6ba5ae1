//! `campex theme` prints the assembled theme of a draft.

use tracing::instrument;

use crate::{
    cli::{ThemeArgs, ThemeFormat},
    commands::{build_service, load_draft, resolve_fragments_dir},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Assemble the draft's theme and print it as JSON or as a CSS block.
#[instrument(skip_all, fields(draft = %args.draft.display()))]
pub async fn execute(args: ThemeArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let draft = load_draft(&args.draft).await?;
    let fragments = resolve_fragments_dir(args.fragments.as_deref(), &config)?;
    let service = build_service(&config, None, fragments)?;

    let (theme, css) = service.preview_theme(&draft.theme_config).await?;

    match args.format {
        ThemeFormat::Json => output.json(theme.as_value())?,
        ThemeFormat::Css => output.payload(&css)?,
    }
    Ok(())
}

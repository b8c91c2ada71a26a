//! TUI command handler.

use anyhow::Result;

use crate::tui;

use super::TuiArgs;

/// Run the TUI application.
pub async fn run(args: TuiArgs) -> Result<()> {
    let config = super::load_config();

    let tui_args = tui::TuiArgs {
        theme: args.theme.or_else(|| Some(config.ui.theme.clone())),
        target: args.target.or_else(|| config.portal.default_target.clone()),
    };

    tui::run(tui_args, config).await
}

use console::style;
use datawise::config::Config;
use datawise::store::{AuthState, UiState};

/// Summary printed by `datawise ui show`.
pub fn render_status(config: &Config, ui: &UiState, auth: &AuthState) -> String {
    let session = match &auth.user {
        Some(user) => format!("{} <{}> ({})", user.name, user.email, user.role),
        None if auth.is_authenticated() => "token stored, user unknown".to_string(),
        None => style("not signed in").dim().to_string(),
    };

    let lines = [
        format!("◆ {}", style("DataWise").white().bold()),
        String::new(),
        format!("  Version    {}", env!("CARGO_PKG_VERSION")),
        format!("  Config     {}", config.config_path.display()),
        format!("  Storage    {}", config.storage_path().display()),
        format!("  API        {}", config.base_url()),
        String::new(),
        format!("  Theme      {}", ui.theme),
        format!(
            "  Sidebar    {}",
            if ui.sidebar_collapsed {
                "collapsed"
            } else {
                "expanded"
            }
        ),
        format!("  Session    {session}"),
    ];
    lines.join("\n")
}

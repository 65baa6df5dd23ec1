use clap::Subcommand;
use datawise::models::Sensitivity;
use datawise::store::Theme;

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// End the session (local state is cleared even if the server call fails)
    Logout,
    /// Create a new account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Check whether the stored token is still valid
    Status,
    /// Request a password-reset e-mail
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password using a reset token
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LgpdCommands {
    /// List catalogued personal data
    List,
    /// Show one personal-data record
    Get { id: String },
    /// Catalogue a new personal-data record
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        source: String,
        #[arg(long, value_parser = parse_sensitivity, default_value = "medium")]
        sensitivity: Sensitivity,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update fields of a personal-data record (omitted fields are unchanged)
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long, value_parser = parse_sensitivity)]
        sensitivity: Option<Sensitivity>,
        #[arg(long)]
        description: Option<String>,
        /// Remove the stored description
        #[arg(long, conflicts_with = "description")]
        clear_description: bool,
    },
    /// Remove a personal-data record
    Delete { id: String },
    /// List analysis templates
    Templates,
    /// Start a compliance analysis
    Analyze {
        #[arg(long, value_parser = parse_sensitivity, default_value = "medium")]
        sensitivity: Sensitivity,
        #[arg(long)]
        no_context: bool,
        #[arg(long)]
        no_patterns: bool,
        #[arg(long)]
        no_compliance: bool,
        #[arg(long)]
        no_recommendations: bool,
    },
    /// Show an analysis result
    Analysis {
        id: String,
        /// Poll until the analysis is no longer processing
        #[arg(long)]
        watch: bool,
        /// Seconds between polls when watching
        #[arg(long, default_value_t = 2)]
        interval: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum UiCommands {
    /// Print current preferences
    Show,
    /// Set the colour theme (light, dark, system)
    Theme {
        #[arg(value_parser = parse_theme)]
        theme: Theme,
    },
    /// Collapse or expand the sidebar
    ToggleSidebar,
}

#[derive(Subcommand, Debug)]
pub enum StatsCommands {
    /// Query volume, distribution and trends
    Queries,
    /// Connected databases and their status
    Databases,
    /// All users
    Users,
    /// The signed-in user
    Me,
}

fn parse_sensitivity(raw: &str) -> Result<Sensitivity, String> {
    raw.parse()
        .map_err(|_| format!("invalid sensitivity {raw:?} (expected low, medium or high)"))
}

fn parse_theme(raw: &str) -> Result<Theme, String> {
    raw.parse()
        .map_err(|_| format!("invalid theme {raw:?} (expected light, dark or system)"))
}

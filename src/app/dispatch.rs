use crate::app::status::render_status;
use crate::cli::commands::{AuthCommands, Cli, Commands, LgpdCommands, StatsCommands, UiCommands};
use anyhow::{Context, Result, bail};
use datawise::AppContext;
use datawise::alert::{Alert, AlertHook, AlertKind, AlertProps};
use datawise::config::Config;
use datawise::fetch::DataFetch;
use datawise::models::{
    AnalysisConfig, AnalysisStatus, LoginCredentials, NewPersonalData, PersonalDataPatch,
    RegisterData,
};
use dialoguer::Password;
use serde::Serialize;
use serde_json::{Value, json};
use std::io::IsTerminal;
use std::time::Duration;

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Auth { auth_command } => run_auth(&ctx, auth_command).await,
        Commands::Lgpd { lgpd_command } => run_lgpd(&ctx, lgpd_command).await,
        Commands::Ui { ui_command } => {
            run_ui(&ctx, ui_command);
            Ok(())
        }
        Commands::Stats { stats_command } => run_stats(&ctx, stats_command).await,
    }
}

/// Prints a one-shot alert through the same hook/component pair the
/// dashboard uses.
fn notify(kind: AlertKind, message: &str, title: Option<&str>) {
    let mut hook = AlertHook::new();
    hook.show_alert(kind, message, title);
    let alert = Alert::mount(AlertProps::from(hook.alert()), || {});
    if let Some(out) = alert.render() {
        println!("{out}");
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to render response")?
    );
    Ok(())
}

fn password_or_prompt(password: Option<String>, prompt: &str) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    if !std::io::stdin().is_terminal() {
        bail!("--password is required in non-interactive mode");
    }
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(false)
        .interact()
        .context("Failed to read password from terminal")
}

async fn run_auth(ctx: &AppContext, command: AuthCommands) -> Result<()> {
    let service = ctx.auth_service();
    match command {
        AuthCommands::Login { email, password } => {
            let password = password_or_prompt(password, "Password (input hidden)")?;
            ctx.auth().set_loading(true);
            match service.login(&LoginCredentials { email, password }).await {
                Ok(response) => {
                    notify(
                        AlertKind::Success,
                        &format!("Bem-vindo, {}", response.user.name),
                        Some("Login realizado"),
                    );
                    Ok(())
                }
                Err(e) => {
                    ctx.auth().set_loading(false);
                    ctx.auth().set_error(Some(e.to_string()));
                    Err(e).context("Login failed")
                }
            }
        }
        AuthCommands::Logout => {
            let result = service.logout().await;
            notify(AlertKind::Info, "Sessão encerrada", None);
            result.context("Server-side logout failed (local session was cleared)")
        }
        AuthCommands::Register {
            name,
            email,
            password,
        } => {
            let password = password_or_prompt(password, "New password (input hidden)")?;
            let response = service
                .register(&RegisterData {
                    name,
                    email,
                    password,
                })
                .await
                .context("Registration failed")?;
            notify(AlertKind::Success, &response.message, Some("Cadastro"));
            Ok(())
        }
        AuthCommands::Status => {
            if !ctx.auth().state().is_authenticated() {
                notify(AlertKind::Warning, "Nenhuma sessão ativa", None);
                return Ok(());
            }
            if service.validate_token().await {
                let state = ctx.auth().state();
                let who = state
                    .user
                    .as_ref()
                    .map_or_else(|| "sessão ativa".to_string(), |u| u.email.clone());
                notify(AlertKind::Success, &who, Some("Token válido"));
            } else {
                notify(
                    AlertKind::Warning,
                    "Faça login novamente",
                    Some("Sessão expirada"),
                );
            }
            Ok(())
        }
        AuthCommands::ForgotPassword { email } => {
            let response = service
                .forgot_password(&email)
                .await
                .context("Password reset request failed")?;
            notify(AlertKind::Info, &response.message, None);
            Ok(())
        }
        AuthCommands::ResetPassword { token, password } => {
            let password = password_or_prompt(password, "New password (input hidden)")?;
            let response = service
                .reset_password(&token, &password)
                .await
                .context("Password reset failed")?;
            notify(AlertKind::Success, &response.message, None);
            Ok(())
        }
    }
}

#[allow(clippy::too_many_lines)]
async fn run_lgpd(ctx: &AppContext, command: LgpdCommands) -> Result<()> {
    let service = ctx.lgpd_service();
    match command {
        LgpdCommands::List => {
            ctx.lgpd().set_loading(true);
            let result = service.get_all_personal_data().await;
            ctx.lgpd().set_loading(false);
            let items = result.context("Failed to list personal data")?;
            print_json(&items)
        }
        LgpdCommands::Get { id } => {
            let item = service
                .get_personal_data_by_id(&id)
                .await
                .with_context(|| format!("Failed to fetch personal data {id}"))?;
            print_json(&item)
        }
        LgpdCommands::Create {
            name,
            category,
            source,
            sensitivity,
            description,
        } => {
            let created = service
                .create_personal_data(&NewPersonalData {
                    name,
                    category,
                    source,
                    sensitivity,
                    description,
                })
                .await
                .context("Failed to create personal data")?;
            notify(
                AlertKind::Success,
                &format!("{} ({})", created.name, created.id),
                Some("Dado pessoal cadastrado"),
            );
            Ok(())
        }
        LgpdCommands::Update {
            id,
            name,
            category,
            source,
            sensitivity,
            description,
            clear_description,
        } => {
            let patch = PersonalDataPatch {
                name,
                category,
                source,
                sensitivity,
                description: if clear_description {
                    Some(None)
                } else {
                    description.map(Some)
                },
            };
            if patch.is_empty() {
                bail!("Nothing to update: pass at least one field");
            }
            let updated = service
                .update_personal_data(&id, &patch)
                .await
                .with_context(|| format!("Failed to update personal data {id}"))?;
            print_json(&updated)
        }
        LgpdCommands::Delete { id } => {
            service
                .delete_personal_data(&id)
                .await
                .with_context(|| format!("Failed to delete personal data {id}"))?;
            notify(AlertKind::Success, &id, Some("Dado pessoal removido"));
            Ok(())
        }
        LgpdCommands::Templates => {
            let templates = service
                .get_templates()
                .await
                .context("Failed to list templates")?;
            print_json(&templates)
        }
        LgpdCommands::Analyze {
            sensitivity,
            no_context,
            no_patterns,
            no_compliance,
            no_recommendations,
        } => {
            let config = AnalysisConfig {
                sensitivity,
                include_context: !no_context,
                identify_patterns: !no_patterns,
                check_compliance: !no_compliance,
                generate_recommendations: !no_recommendations,
            };
            let ticket = service
                .start_analysis(&config)
                .await
                .context("Failed to start analysis")?;
            notify(
                AlertKind::Info,
                &format!("datawise lgpd analysis {} --watch", ticket.analysis_id),
                Some("Análise iniciada"),
            );
            Ok(())
        }
        LgpdCommands::Analysis {
            id,
            watch,
            interval,
        } => {
            let mut fetch = DataFetch::start(id, move |id: String| {
                let service = service.clone();
                async move { service.get_analysis_result(&id).await }
            });
            loop {
                let state = fetch.settled().await;
                if let Some(err) = state.error {
                    bail!("Failed to fetch analysis: {err}");
                }
                let Some(result) = state.data else {
                    bail!("Analysis response was empty");
                };
                if watch && result.status == AnalysisStatus::Processing {
                    tracing::info!(id = %result.id, "analysis still processing");
                    tokio::time::sleep(Duration::from_secs(interval.max(1))).await;
                    fetch.refetch();
                    continue;
                }
                return print_json(&result);
            }
        }
    }
}

fn run_ui(ctx: &AppContext, command: UiCommands) {
    match command {
        UiCommands::Show => {}
        UiCommands::Theme { theme } => ctx.ui().set_theme(theme),
        UiCommands::ToggleSidebar => ctx.ui().toggle_sidebar(),
    }
    println!(
        "{}",
        render_status(ctx.config(), &ctx.ui().state(), &ctx.auth().state())
    );
}

async fn run_stats(ctx: &AppContext, command: StatsCommands) -> Result<()> {
    let endpoints = ctx.endpoints();
    let report: Value = match command {
        StatsCommands::Queries => json!({
            "stats": endpoints.queries_stats().await?,
            "distribution": endpoints.queries_distribution().await?,
            "trends": endpoints.queries_trends().await?,
        }),
        StatsCommands::Databases => json!({
            "connected": endpoints.databases_connected().await?,
            "status": endpoints.databases_status().await?,
        }),
        StatsCommands::Users => endpoints.users_all().await?,
        StatsCommands::Me => endpoints.users_current().await?,
    };
    print_json(&report)
}

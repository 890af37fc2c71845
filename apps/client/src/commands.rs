//! Command handlers — the terminal front end over the auth controller, route
//! guard, and dashboard.

use anyhow::{anyhow, Context};
use tracing::{debug, info};

use crate::analysis::orchestrator::{Dashboard, SubmitOutcome};
use crate::auth::session::Resolution;
use crate::cli::{AnalyzeArgs, Command, Credentials};
use crate::errors::{AnalysisError, ClientError};
use crate::render::preview::{export_document, export_markdown};
use crate::render::report::render_report;
use crate::routes::guard::{guard, GuardOutcome};
use crate::routes::{nav_action, NavAction, Route};
use crate::state::AppState;
use crate::upload::form::{FileEvent, SelectedFile};

pub async fn run(command: Command, mut state: AppState) -> Result<(), ClientError> {
    match command {
        Command::Login(credentials) => handle_login(&state, credentials).await,
        Command::Signup(credentials) => handle_signup(&state, credentials).await,
        Command::Logout => handle_logout(&state),
        Command::Whoami => handle_whoami(&mut state).await,
        Command::Analyze(args) => handle_analyze(&mut state, args).await,
    }
}

/// `login`: POST /api/auth/token, then resolve the new token's identity.
async fn handle_login(state: &AppState, credentials: Credentials) -> Result<(), ClientError> {
    let token = state
        .api
        .login(&credentials.email, &credentials.password)
        .await?;
    let resolution = state.auth.login(token.access_token).await?;
    report_session(state, resolution)
}

/// `signup`: POST /api/auth/signup, then resolve the new token's identity.
async fn handle_signup(state: &AppState, credentials: Credentials) -> Result<(), ClientError> {
    let token = state
        .api
        .signup(&credentials.email, &credentials.password)
        .await?;
    let resolution = state.auth.signup(token.access_token).await?;
    report_session(state, resolution)
}

fn report_session(state: &AppState, resolution: Resolution) -> Result<(), ClientError> {
    match (resolution, state.auth.snapshot().user) {
        (Resolution::Applied, Some(user)) => {
            println!("Logged in as {}", user.email);
            Ok(())
        }
        _ => Err(ClientError::Unauthenticated),
    }
}

fn handle_logout(state: &AppState) -> Result<(), ClientError> {
    state.auth.logout()?;
    println!("Logged out.");
    Ok(())
}

async fn handle_whoami(state: &mut AppState) -> Result<(), ClientError> {
    state.resolve_session().await;
    let snapshot = state.auth.snapshot();
    debug!("Auth phase: {:?}", state.auth.phase());

    match (&snapshot.user, nav_action(&snapshot)) {
        (Some(user), NavAction::Logout) => {
            println!("{} (id {})", user.email, user.id);
            println!("Analyses used: {}", user.usage_count);
            println!("API: {}", state.config.api_base_url);
            Ok(())
        }
        _ => Err(ClientError::Unauthenticated),
    }
}

/// `analyze`: the protected dashboard flow.
async fn handle_analyze(state: &mut AppState, args: AnalyzeArgs) -> Result<(), ClientError> {
    state.resolve_session().await;
    let snapshot = state.auth.snapshot();

    let mut dashboard = match guard(&snapshot, Route::Dashboard.path(), Dashboard::new()) {
        GuardOutcome::Render(dashboard) => dashboard,
        GuardOutcome::Loading => {
            return Err(anyhow!("Session is still being resolved").into());
        }
        GuardOutcome::Redirect { to, from } => {
            info!("Redirecting to {to} (requested {from})");
            return Err(ClientError::Unauthenticated);
        }
    };

    let file = SelectedFile::from_path(&args.resume)
        .await
        .with_context(|| format!("Could not open {}", args.resume.display()))?;
    dashboard.form.handle(FileEvent::Picked(file))?;

    dashboard.form.target_role = args.role;
    dashboard.form.experience_level = args.experience_level;
    dashboard.form.job_description = match (args.job_description, args.job_description_file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Could not read {}", path.display()))?,
        (None, None) => String::new(),
    };

    if let Some(file) = dashboard.form.selected_file() {
        let level = dashboard
            .form
            .experience_level
            .map(|level| format!(", {}", level.label()))
            .unwrap_or_default();
        eprintln!(
            "Analyzing {} ({}) for {}{level}...",
            file.name,
            file.display_size(),
            dashboard.form.target_role
        );
    }
    let token = state.auth.bearer_token();
    let outcome = dashboard.submit(state.api.as_ref(), token.as_deref()).await;

    match outcome {
        SubmitOutcome::Succeeded => {}
        SubmitOutcome::Failed => {
            let error = dashboard
                .view()
                .error()
                .cloned()
                .unwrap_or(AnalysisError::RequestFailed(None));
            return Err(error.into());
        }
        SubmitOutcome::Skipped => {
            return Err(anyhow!("A resume file and a target role are required").into());
        }
    }

    let Some(result) = dashboard.view().result() else {
        return Err(anyhow!("Analysis finished without a result").into());
    };
    println!("{}", render_report(result));

    if let Some(path) = &args.markdown {
        if export_markdown(result, path)
            .await
            .with_context(|| format!("Could not write {}", path.display()))?
        {
            println!("Optimized resume markdown saved to {}", path.display());
        }
    }

    if !args.no_export {
        let exported = export_document(result, &args.export_dir)
            .await
            .with_context(|| format!("Could not export to {}", args.export_dir.display()))?;
        if let Some(path) = exported {
            println!(
                "Optimized resume preview saved to {} (open it and print to PDF)",
                path.display()
            );
        }
    }

    Ok(())
}

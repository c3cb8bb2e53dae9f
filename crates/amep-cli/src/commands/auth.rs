use amep_config::AmepConfig;
use amep_core::{
    Credentials, RegistrationProfile,
    responses::{AuthSessionResponse, AuthStatusResponse},
};
use amep_session::{LoginOutcome, SessionStore};
use serde::Serialize;

use crate::cli::{AuthCommands, GlobalFlags, LoginArgs, RegisterArgs};
use crate::output::output;

#[derive(Serialize)]
struct LogoutResponse {
    logged_out: bool,
}

pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    config: &AmepConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login(args, flags, config).await,
        AuthCommands::Register(args) => register(args, flags, config).await,
        AuthCommands::Logout => logout(flags, config),
        AuthCommands::Status => status(flags, config).await,
    }
}

async fn login(args: &LoginArgs, flags: &GlobalFlags, config: &AmepConfig) -> anyhow::Result<()> {
    let mut session = SessionStore::new(super::client(config)?);
    let outcome = session
        .login(&Credentials {
            email: args.email.clone(),
            password: args.password.clone(),
        })
        .await;
    report(outcome, flags)
}

async fn register(
    args: &RegisterArgs,
    flags: &GlobalFlags,
    config: &AmepConfig,
) -> anyhow::Result<()> {
    let mut session = SessionStore::new(super::client(config)?);
    let outcome = session
        .register(&RegistrationProfile {
            display_name: args.name.clone(),
            email: args.email.clone(),
            password: args.password.clone(),
            role: args.role.into(),
        })
        .await;
    report(outcome, flags)
}

fn report(outcome: LoginOutcome, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(identity) = outcome.identity else {
        anyhow::bail!(
            "{}",
            outcome.error.unwrap_or_else(|| "Login failed".to_string())
        );
    };
    output(
        &AuthSessionResponse {
            authenticated: true,
            user_id: identity.user_id,
            role: identity.role,
            display_name: identity.display_name,
        },
        flags.format,
    )
}

fn logout(flags: &GlobalFlags, config: &AmepConfig) -> anyhow::Result<()> {
    let mut session = SessionStore::new(super::client(config)?);
    session.logout()?;
    output(&LogoutResponse { logged_out: true }, flags.format)
}

async fn status(flags: &GlobalFlags, config: &AmepConfig) -> anyhow::Result<()> {
    let mut session = SessionStore::new(super::client(config)?);
    session.restore().await;

    let source = session.credential_source().map(|s| s.as_str().to_string());
    let response = match session.identity() {
        Some(identity) => AuthStatusResponse {
            authenticated: true,
            user_id: Some(identity.user_id.clone()),
            role: Some(identity.role),
            display_name: Some(identity.display_name.clone()),
            credential_source: source,
        },
        None => AuthStatusResponse {
            authenticated: false,
            user_id: None,
            role: None,
            display_name: None,
            credential_source: None,
        },
    };
    output(&response, flags.format)
}

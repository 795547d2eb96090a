//! Auth commands - login, refresh, revoke

use anyhow::{Context, Result};
use teslapi_client::{TeslaClient, TokenResponse};

use crate::output::OutputContext;

fn print_token(token: &TokenResponse, ctx: &OutputContext) {
    let expires = token
        .expires_at()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".to_string());

    let pairs = vec![
        ("Access Token", token.access_token.clone()),
        ("Refresh Token", token.refresh_token.clone().unwrap_or_else(|| "-".to_string())),
        ("Token Type", token.token_type.clone().unwrap_or_else(|| "-".to_string())),
        ("Expires", expires),
    ];
    ctx.print_kv(&pairs);
}

/// Exchange account credentials for a token
pub async fn login(
    client: &TeslaClient,
    email: &str,
    password: &str,
    ctx: &OutputContext,
) -> Result<()> {
    let token = client
        .login(email, password)
        .await
        .context("Login failed")?;
    print_token(&token, ctx);
    Ok(())
}

/// Exchange a refresh token for a new token
pub async fn refresh(client: &TeslaClient, refresh_token: &str, ctx: &OutputContext) -> Result<()> {
    let token = client
        .refresh_token(refresh_token)
        .await
        .context("Token refresh failed")?;
    print_token(&token, ctx);
    Ok(())
}

/// Revoke an access token
pub async fn revoke(client: &TeslaClient, token: &str, ctx: &OutputContext) -> Result<()> {
    client.revoke_token(token).await.context("Revoke failed")?;
    ctx.success("Token revoked");
    Ok(())
}

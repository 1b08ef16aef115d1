use crate::{
    Res,
    args::LoginOptions,
    cli::Outcome,
    config::Config,
    credentials::{self, Prompter},
    mangacat::{self, ApiClient},
};

pub async fn login(
    opts: &LoginOptions,
    config: &Config,
    client: &ApiClient,
    prompter: &mut dyn Prompter,
) -> Res<Outcome> {
    let source = opts.source()?;
    let creds = credentials::resolve(&source, config, prompter)?;

    Ok(match mangacat::auth::login(client, &creds).await {
        Some(token) => Outcome::success(format!("Authentication token: {token}")),
        None => Outcome::failure(),
    })
}

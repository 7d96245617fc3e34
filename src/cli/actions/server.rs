use crate::{cli::actions::Action, pordisto};
use anyhow::Result;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            auth_url,
        } => {
            pordisto::new(port, dsn, auth_url).await?;
        }
    }

    Ok(())
}

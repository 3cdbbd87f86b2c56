use webook::{Config, HttpSignupFlow, Repo};

#[derive(Debug, Clone)]
pub struct AppState {
    flow: HttpSignupFlow,
}

impl AppState {
    pub async fn load() -> n0_error::Result<Self> {
        let repo = Repo::open_or_create(Repo::default_location()).await?;
        let config = repo.config().await?.with_env_overrides();
        let flow = HttpSignupFlow::from_config(config)?;

        Ok(AppState { flow })
    }

    pub fn flow(&self) -> &HttpSignupFlow {
        &self.flow
    }

    pub fn config(&self) -> &Config {
        self.flow.config()
    }
}

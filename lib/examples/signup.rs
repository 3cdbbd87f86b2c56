//! Starts the dev backend on a random local port and signs up against it.
//!
//! cargo run -p webook --example signup -- me@webook.test helloworld123

use std::net::Ipv4Addr;

use n0_error::StdResultExt;
use tokio_util::sync::CancellationToken;
use webook::{Config, HttpSignupFlow, SignupForm, dev_backend::DevBackend};

#[tokio::main]
async fn main() -> n0_error::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let email = args.next().unwrap_or_else(|| "me@webook.test".to_string());
    let password = args.next().unwrap_or_else(|| "helloworld123".to_string());

    let cancel = CancellationToken::new();
    let (addr, server) = DevBackend::default()
        .spawn((Ipv4Addr::LOCALHOST, 0).into(), cancel.clone())
        .await?;

    let config = Config {
        api_url: format!("http://{addr}"),
        ..Default::default()
    };
    let flow = HttpSignupFlow::from_config(config)?;

    // Submitting twice shows both the success and the duplicate reply.
    for _ in 0..2 {
        let outcome = flow
            .submit(&SignupForm::new(&email, &password, &password))
            .await;
        for notice in &outcome.notices {
            println!("[{}] {}", notice.level, notice.text);
        }
        if outcome.navigate.is_some() {
            println!("-> {}", flow.config().login_route);
        }
    }

    cancel.cancel();
    server.await.anyerr()??;
    Ok(())
}

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post, MethodRouter},
    serve, Router,
};
use axum_server::tls_openssl::{bind_openssl, OpenSSLConfig};
use log::info;
use strum::IntoEnumIterator;
use tokio::net::TcpListener;

use crate::mattermost::{
    request::{EightbotRequestError, OutgoingMessage, SlashCommand, WebhookArgs},
    response::{EightbotResponse, OutgoingReply},
};

use super::{
    icon::EightbotIcon, origin::RequestOrigin, routes::EightbotRoute,
    server_environment::ServerEnvironment,
};

/// Runs this tool as an http server using the specified `ServerEnvironment`.
pub async fn run_http_server(environment: Arc<ServerEnvironment>) -> anyhow::Result<()> {
    let transport = environment.transport().clone();
    let address = environment.address();
    let acceptor = transport.ssl_acceptor()?;
    let server = eightbot_server(environment);
    info!("{} on {}.", transport.banner(), address);
    match acceptor {
        Some(acceptor) => {
            let config = OpenSSLConfig::from_acceptor(Arc::new(acceptor));
            let tls_server = bind_openssl(address, config);
            Ok(tls_server.serve(server.into_make_service()).await?)
        }
        None => {
            let listener = TcpListener::bind(address).await?;
            Ok(serve(listener, server).await?)
        }
    }
}

fn eightbot_server(environment: Arc<ServerEnvironment>) -> Router<()> {
    EightbotRoute::iter()
        .fold(Router::new(), |router, route| {
            router.route(route.path(), route_handler(route))
        })
        .with_state(environment)
}

fn route_handler(route: EightbotRoute) -> MethodRouter<Arc<ServerEnvironment>> {
    match route {
        EightbotRoute::Root => get(get_root),
        EightbotRoute::Slash => post(post_slash),
        EightbotRoute::Outgoing => post(post_outgoing),
        EightbotRoute::Icon => get(get_icon),
    }
}

async fn get_root(State(environment): State<Arc<ServerEnvironment>>) -> &'static str {
    environment.eightball().choose()
}

async fn post_slash(
    State(environment): State<Arc<ServerEnvironment>>,
    origin: RequestOrigin,
    args: WebhookArgs,
) -> Result<EightbotResponse, EightbotRequestError> {
    let command = SlashCommand::try_from(args)?;
    Ok(EightbotResponse::slash(
        command.user_name(),
        command.question(),
        environment.eightball().choose(),
        origin.icon_url(),
    ))
}

async fn post_outgoing(
    State(environment): State<Arc<ServerEnvironment>>,
    origin: RequestOrigin,
    args: WebhookArgs,
) -> Result<OutgoingReply, EightbotRequestError> {
    let message = OutgoingMessage::try_from(args)?;
    let answer = environment.eightball().answer_outgoing(message.text());
    Ok(OutgoingReply::new(answer, || origin.icon_url()))
}

async fn get_icon(State(environment): State<Arc<ServerEnvironment>>) -> EightbotIcon {
    environment.icon().clone()
}

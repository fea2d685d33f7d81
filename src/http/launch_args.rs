use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::Parser;

use super::transport::Transport;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ICON_PATH: &str = "./resources/8_ball_icon.svg";

/// The command line arguments that configure the server.
#[derive(Debug, Parser)]
#[command(
    name = "eightbot",
    about = "Magic eight-ball web service that can be used from Mattermost",
    after_help = "Examples:\n  eightbot --insecure -p 8080\n  eightbot --certificate certs/eightbot"
)]
pub struct LaunchArgs {
    #[arg(long, value_name = "NAME", conflicts_with = "insecure", help = "TLS certificate to use")]
    certificate: Option<PathBuf>,
    #[arg(long, help = "Run over HTTP instead of over HTTPS")]
    insecure: bool,
    #[arg(long, short, default_value_t = DEFAULT_PORT, help = "Port to bind to")]
    port: u16,
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED), help = "Address to bind to")]
    host: IpAddr,
    #[arg(long, default_value = DEFAULT_ICON_PATH, help = "Path to the icon served by eightbot")]
    icon: PathBuf,
}

impl LaunchArgs {
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn transport(&self) -> Transport {
        match (&self.certificate, self.insecure) {
            (Some(prefix), _) => Transport::Certificate(prefix.clone()),
            (None, true) => Transport::Insecure,
            (None, false) => Transport::AdHoc,
        }
    }

    pub fn icon(&self) -> &PathBuf {
        &self.icon
    }
}

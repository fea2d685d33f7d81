use std::net::SocketAddr;

use anyhow::Result;
use log::info;

use crate::eightball::{random::ThreadSafeRandom, Eightball};

use super::{icon::EightbotIcon, launch_args::LaunchArgs, transport::Transport};

/// A data type containing necessary structs for server operations.
pub struct ServerEnvironment {
    eightball: Eightball,
    icon: EightbotIcon,
    transport: Transport,
    address: SocketAddr,
}

impl ServerEnvironment {
    /// The environment described by the command line arguments.
    ///
    /// Fails if the icon cannot be loaded.
    pub fn from_launch_args(args: &LaunchArgs) -> Result<Self> {
        let icon = EightbotIcon::load(args.icon())?;
        info!("Loaded eightbot icon from {}.", args.icon().display());
        Ok(Self {
            eightball: Eightball::new(ThreadSafeRandom::from_entropy()),
            icon,
            transport: args.transport(),
            address: args.address(),
        })
    }

    /// An insecure environment with the bundled icon and the specified random source.
    #[cfg(test)]
    pub fn testing(random: impl crate::eightball::random::EightballRandom + 'static) -> Self {
        Self {
            eightball: Eightball::new(random),
            icon: EightbotIcon::load(super::launch_args::DEFAULT_ICON_PATH).unwrap(),
            transport: Transport::Insecure,
            address: "127.0.0.1:8000".parse().unwrap(),
        }
    }
}

impl ServerEnvironment {
    pub fn eightball(&self) -> &Eightball {
        &self.eightball
    }

    pub fn icon(&self) -> &EightbotIcon {
        &self.icon
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }
}

pub mod icon;
pub mod launch_args;
pub mod origin;
pub mod routes;
pub mod server;
pub mod server_environment;
pub mod transport;

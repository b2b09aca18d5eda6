//! `stockbook config` command - show resolved configuration

use miette::Result;

use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {}

pub fn run(_args: ConfigArgs) -> Result<()> {
    let config = Config::load();

    println!("base_url: {}", config.base_url());
    println!("login: {}", config.login.as_deref().unwrap_or("(not set)"));
    println!(
        "password: {}",
        if config.password.is_some() {
            "********"
        } else {
            "(not set)"
        }
    );
    Ok(())
}

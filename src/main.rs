use anyhow::Result;
use clap::{crate_version, App as ClapApp, Arg};
use folio_tui::app::{App, LaunchOptions};
use folio_tui::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new("folio")
        .version(crate_version!())
        .about("A terminal portfolio site with an admin panel backed by Firestore")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml (defaults to ~/.config/folio-tui)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("admin")
                .long("admin")
                .help("Open the admin panel on start"),
        )
        .arg(
            Arg::with_name("dev-auth-bypass")
                .long("dev-auth-bypass")
                .help("Sign in as a stub user without credentials (development only)"),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;

    App::start(
        config,
        LaunchOptions {
            start_in_admin: matches.is_present("admin"),
            dev_auth_bypass: matches.is_present("dev-auth-bypass"),
        },
    )
    .await
}

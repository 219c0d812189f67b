use clap::Parser;

#[derive(Parser)]
#[command(name = "yc-autostart")]
#[command(about = "Keeps a Yandex Cloud compute instance running", version)]
pub struct Cli {
    /// Run the interactive setup wizard and exit
    #[arg(long)]
    pub setup: bool,
}

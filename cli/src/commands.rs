use clap::Parser;

#[derive(Parser)]
#[command(name = "hoppr")]
#[command(about = "Inventory-aware ssh: resolve hosts from Ansible-style inventories.")]
pub struct CommandLine {
    /// Host name as declared in the inventory (a glob pattern with --list)
    pub host: String,

    /// Print matching host names instead of connecting
    #[arg(short, long)]
    pub list: bool,

    /// Extra arguments handed through to the ssh command untouched
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub ssh_args: Vec<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

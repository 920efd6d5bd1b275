/// ipcalc - IPv6-enabled CIDR calculator
///
/// Default action is to show the prefixes details
#[derive(clap::Parser, Debug)]
#[command(name = "ipcalc", version, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Zero-compress IPv6 addresses using the "::" notation
    #[arg(short, long, global = true)]
    pub compress: bool,

    /// Print additional information
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Prefixes as address/length or address/mask
    #[arg(value_name = "PREFIX", required = true)]
    pub prefixes: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Split the specified prefix into "n" sub-networks
    #[command(visible_alias = "sub")]
    Subnet {
        prefix: String,
        /// Number of subnets, a power of 2
        #[arg(allow_negative_numbers = true)]
        n: String,
    },
}

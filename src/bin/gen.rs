//! v2dat-gen: CLI tool for compiling a rule-list directory into GeoSite/GeoIP files.

use clap::Parser;
use std::path::PathBuf;
use v2dat::config::{DEFAULT_DATA_PATH, DEFAULT_OUTPUT_DIR};
use v2dat::CompilerConfig;

#[derive(Parser)]
#[command(name = "v2dat-gen")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Compile rule lists into v2site.dat / v2ip.dat", long_about = None)]
struct Cli {
    /// Directory holding the rule list files
    #[arg(long = "dataPath", value_name = "DIR", default_value = DEFAULT_DATA_PATH)]
    data_path: PathBuf,

    /// Directory the outputs are written to
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = CompilerConfig::new(cli.data_path).with_output_dir(cli.output_dir);

    // Failures are reported but do not change the exit status
    match v2dat::run(&config) {
        Ok(compilation) => {
            if cli.verbose {
                println!(
                    "Compiled {} site lists ({} domains), {} IP lists ({} CIDRs)",
                    compilation.sites.entry.len(),
                    compilation.domain_count(),
                    compilation.ips.entry.len(),
                    compilation.cidr_count()
                );
            }
        }
        Err(e) => println!("Failed: {}", e),
    }
}

/*!
 * Command-line interface for projdump
 */

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::error;

use projdump::config::{Args, Config};
use projdump::flattener::ProjectFlattener;
use projdump::report::{ReportFormat, Reporter};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let format = if args.plain {
        ReportFormat::Plain
    } else {
        ReportFormat::ConsoleTable
    };

    // Create configuration
    let config = Config::from_args(args);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::from(1);
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} [{pos} read, {elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📂 Scanning");
    progress.set_message(config.root_path.display().to_string());

    let flattener = ProjectFlattener::new(config, Arc::new(progress.clone()));
    let result = flattener.run();

    progress.finish_and_clear();

    match result {
        Ok(stats) => {
            Reporter::new(format).print_report(&stats);
            if stats.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::from(1)
        }
    }
}

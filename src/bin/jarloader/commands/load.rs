//! `jarloader load` command

use std::io::IsTerminal;

use anyhow::{Context, Result};

use crate::cli::LoadArgs;
use jarloader::ops::{load_into_host, LoadOptions};
use jarloader::util::diagnostic::emit;
use jarloader::util::fs::write_string;
use jarloader::util::GlobalContext;
use jarloader::ReqwestClient;

const FAILURE_BANNER: &str = "FAILED TO LOAD SCALA LIBRARIES FOR DEPENDENCIES";

pub fn execute(args: LoadArgs, mut ctx: GlobalContext) -> Result<()> {
    let mut host = super::prepare_host(&args.host, &mut ctx);

    let mut options = LoadOptions::from_config(ctx.config());
    if args.jobs.is_some() {
        options.jobs = args.jobs;
    }
    options.offline |= args.offline;
    options.progress &= !args.no_progress && std::io::stderr().is_terminal();

    let net = &ctx.config().net;
    let client = ReqwestClient::with_settings(net.timeout(), net.user_agent.as_deref())?;

    let report = match load_into_host(&ctx, &mut host, client, &options) {
        Ok(report) => report,
        Err(err) => {
            print_banner();
            emit(&err.to_diagnostic(), ctx.color());
            std::process::exit(1);
        }
    };

    if !report.fetched.is_empty() {
        eprintln!(
            "  Downloaded {} {} into {}",
            report.fetched.len(),
            if report.fetched.len() == 1 { "library" } else { "libraries" },
            ctx.cache_dir().display()
        );
    }

    let classpath = host.classpath()?;
    let classpath = classpath
        .to_str()
        .context("classpath is not valid UTF-8")?;

    match args.output {
        Some(path) => {
            write_string(&path, &format!("{}\n", classpath))?;
            eprintln!("       Wrote {}", path.display());
        }
        None => println!("{}", classpath),
    }

    Ok(())
}

fn print_banner() {
    let rule = "*".repeat(FAILURE_BANNER.len() + 4);
    eprintln!("{}", rule);
    eprintln!("* {} *", FAILURE_BANNER);
    eprintln!("{}", rule);
}

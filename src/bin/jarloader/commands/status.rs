//! `jarloader status` command

use anyhow::{bail, Context, Result};

use crate::cli::{OutputFormat, StatusArgs};
use jarloader::ops::status::status;
use jarloader::util::diagnostic::emit;
use jarloader::util::GlobalContext;
use jarloader::{DependencyTable, SearchPathIndex};

pub fn execute(args: StatusArgs, mut ctx: GlobalContext) -> Result<()> {
    let host = super::prepare_host(&args.host, &mut ctx);

    let table = DependencyTable::builtin()?;
    let available = SearchPathIndex::snapshot(&host)?;
    let report = status(&table, &available, &ctx.cache_dir());

    match args.format {
        OutputFormat::Human => {
            print!("{}", report.format_human());
            eprintln!("       Cache {}", report.cache_dir.display());
            if let Some(diag) = report.to_diagnostic() {
                emit(&diag, ctx.color());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("failed to serialize status report")?;
            println!("{}", json);
        }
    }

    if args.check && !report.satisfied {
        let missing = report.missing();
        bail!(
            "{} {} would need downloading",
            missing,
            if missing == 1 { "library" } else { "libraries" }
        );
    }

    Ok(())
}

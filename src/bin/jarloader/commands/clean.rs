//! `jarloader clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use jarloader::util::fs::remove_dir_all_if_exists;
use jarloader::util::GlobalContext;

pub fn execute(args: CleanArgs, mut ctx: GlobalContext) -> Result<()> {
    if let Some(dir) = args.cache_dir {
        ctx.set_cache_dir(dir);
    }

    let cache_dir = ctx.cache_dir();

    if remove_dir_all_if_exists(&cache_dir)? {
        eprintln!("     Removed {}", cache_dir.display());
    } else {
        eprintln!("     Nothing to clean at {}", cache_dir.display());
    }

    Ok(())
}

//! Command implementations

pub mod clean;
pub mod completions;
pub mod load;
pub mod status;

use std::ffi::OsStr;

use jarloader::util::GlobalContext;
use jarloader::ClasspathHost;

use crate::cli::HostArgs;

/// Build the host and apply the cache directory override.
fn prepare_host(args: &HostArgs, ctx: &mut GlobalContext) -> ClasspathHost {
    if let Some(dir) = &args.cache_dir {
        ctx.set_cache_dir(dir.clone());
    }

    match &args.classpath {
        Some(cp) => ClasspathHost::from_classpath(OsStr::new(cp)),
        None => ClasspathHost::from_env(),
    }
}

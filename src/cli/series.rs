use crate::{Res, args::SeriesAddOpts, cli::Outcome, error::Error};

/// Arguments are fully validated by the time this runs, but creating series
/// is not supported by the client yet.
pub fn add_series(opts: &SeriesAddOpts) -> Res<Outcome> {
    log::debug!(
        "Series \"{}\" with {} cover \"{}\"",
        opts.name,
        opts.cover.format(),
        opts.cover.path().display()
    );
    Err(Error::NotImplemented("series add"))
}

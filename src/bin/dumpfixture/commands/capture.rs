use std::path::Path;

use anyhow::Context;
use dumpfixture::{
    dump::{default_dump_path, write_fixture_dump},
    DumpOptions,
};

use crate::{app::GlobalOptions, output::emit};

pub fn run(output: Option<&Path>, options: DumpOptions, opts: &GlobalOptions) -> anyhow::Result<()> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => default_dump_path().context("failed to determine the dump location")?,
    };

    if options.has_unknown_bits() {
        log::warn!(
            "Options 0x{:x} contain bits the snapshot facility does not define",
            options.bits()
        );
    }

    let report = write_fixture_dump(&path, options)
        .with_context(|| format!("failed to write dump file: {}", path.display()))?;

    emit(&report, opts)
}

use anyhow::Context;
use dumpfixture::fixture::{build, RetentionGuard};

use crate::{app::GlobalOptions, output::emit};

pub fn run(opts: &GlobalOptions) -> anyhow::Result<()> {
    let graph = RetentionGuard::new(build().context("failed to build the fixture graph")?);
    let census = graph.census();

    let missing = census.missing();
    if !missing.is_empty() {
        anyhow::bail!(
            "fixture graph lacks instances of: {}",
            missing
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    emit(&census, opts)
}

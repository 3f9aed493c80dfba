//! Rendering of command results, either as JSON or for the terminal.

use std::fmt::Write as _;

use comfy_table::{presets, CellAlignment, ContentArrangement, Table};
use dumpfixture::{
    dump::DumpReport,
    fixture::{Census, CensusEntry, Representation},
};
use serde::Serialize;
use strum::EnumCount;

use crate::app::GlobalOptions;

/// A command result with a human-readable form next to its JSON form.
pub trait Render: Serialize {
    fn render(&self) -> String;
}

/// Print `result` to stdout, as JSON with `--json`.
pub fn emit<T: Render>(result: &T, opts: &GlobalOptions) -> anyhow::Result<()> {
    let text = if opts.json {
        serde_json::to_string_pretty(result)?
    } else {
        result.render()
    };
    println!("{text}");
    Ok(())
}

impl Render for DumpReport {
    fn render(&self) -> String {
        format!(
            "Written {} dump file to {}.\nOptions:    {}\nSize:       {} bytes\nInstances:  {}",
            self.arch,
            self.path.display(),
            self.options,
            self.bytes,
            self.instances
        )
    }
}

const CENSUS_COLUMNS: [(&str, CellAlignment); 4] = [
    ("CATEGORY", CellAlignment::Left),
    ("PATH", CellAlignment::Left),
    ("SEED", CellAlignment::Right),
    ("ADDRESS", CellAlignment::Right),
];

fn census_row(entry: &CensusEntry) -> [String; 4] {
    [
        entry.category.to_string(),
        entry.path.clone(),
        entry.seed.map_or_else(|| "-".to_string(), |s| s.to_string()),
        format!("0x{:x}", entry.address),
    ]
}

impl Render for Census {
    fn render(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(CENSUS_COLUMNS.map(|(name, _)| name));

        let last = CENSUS_COLUMNS.len() - 1;
        for (i, (_, align)) in CENSUS_COLUMNS.iter().enumerate() {
            if let Some(column) = table.column_mut(i) {
                column.set_cell_alignment(*align);
                column.set_padding((u16::from(i > 0), u16::from(i < last)));
            }
        }

        for entry in self.entries() {
            table.add_row(census_row(entry));
        }

        let mut text = String::new();
        for line in table.to_string().lines() {
            let _ = writeln!(text, "{}", line.trim_end());
        }
        let _ = write!(
            text,
            "\n{} instances covering {} representations",
            self.len(),
            Representation::COUNT
        );
        text
    }
}

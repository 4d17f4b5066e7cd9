//! The `revisit presets` command.

use comfy_table::{Cell, Table};

use revisit_core::Preset;

pub fn execute() {
    let mut table = Table::new();
    table.set_header(vec![
        "Preset",
        "Threshold",
        "Trigger",
        "Passes",
        "Pause after",
        "Bank",
    ]);

    for preset in Preset::ALL {
        let config = preset.config();
        let pause = config
            .repeated_review_limit
            .map(|limit| format!("{limit} reviews"))
            .unwrap_or_else(|| "never".to_string());
        table.add_row(vec![
            Cell::new(preset),
            Cell::new(format!("{:.0}%", config.review_threshold)),
            Cell::new(format!("> {} wrong", config.wrong_answer_trigger)),
            Cell::new(config.max_review_cycles),
            Cell::new(pause),
            Cell::new(if config.cyclic { "cyclic" } else { "single pass" }),
        ]);
    }

    println!("{table}");
}

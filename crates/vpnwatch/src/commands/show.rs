//! Show handler: display a day's record on the console.

use tabled::Tabled;

use vpnwatch_core::{DailyRecord, RecordRow};

use crate::cli::{GlobalOpts, OutputFormat, ShowArgs};
use crate::commands::resolve_date;
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct RecordRowDisplay {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "VPN Users")]
    vpn_users: u64,
    #[tabled(rename = "Peak Users")]
    peak_users: u64,
}

impl From<&RecordRow> for RecordRowDisplay {
    fn from(row: &RecordRow) -> Self {
        Self {
            time: row.time.clone(),
            vpn_users: row.vpn_users,
            peak_users: row.peak_users,
        }
    }
}

pub fn handle(args: ShowArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let date = resolve_date(args.date.as_deref())?;
    let record = DailyRecord::new(config::log_dir(args.log_dir, &cfg.defaults));

    let rows = record.load(date)?;
    let out = match args.output {
        OutputFormat::Table => {
            let display: Vec<RecordRowDisplay> = rows.iter().map(Into::into).collect();
            output::render_table(&display)
        }
        OutputFormat::Json => output::render_json(&rows),
        OutputFormat::Plain => rows
            .iter()
            .map(|r| format!("{} {} {}", r.time, r.vpn_users, r.peak_users))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

//! Report handler: render the day's record into a chart spreadsheet and
//! mail it as an attachment.

use std::path::Path;

use vpnwatch_core::{DailyRecord, Mailer, write_workbook};

use crate::cli::{GlobalOpts, ReportArgs};
use crate::commands::resolve_date;
use crate::config;
use crate::error::CliError;

pub fn handle(args: ReportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let name = config::active_profile_name(global, &cfg);
    let profile = config::require_profile(&cfg, &name)?;

    let date = resolve_date(args.date.as_deref())?;
    let record = DailyRecord::new(config::log_dir(args.log_dir, &cfg.defaults));

    let rows = record.load(date)?;
    let workbook = record.xlsx_path(date);
    write_workbook(&rows, date, &workbook)?;
    println!("Report written to {}", workbook.display());

    let Some(mail) = profile.mail.as_ref() else {
        tracing::info!("no mail settings for profile '{name}'; report kept on disk");
        return Ok(());
    };
    let mailer = Mailer::new(config::resolve_mail(mail, &name)?);

    match mailer.send_report(&workbook, date) {
        // The artifacts stay on disk when the relay rejects the message.
        Err(err) => eprintln!("error sending mail: {err}"),
        Ok(()) => {
            println!("email sent");
            if args.cleanup {
                remove_artifact(&record.csv_path(date));
                remove_artifact(&workbook);
            }
        }
    }
    Ok(())
}

/// Best-effort removal after a successful send. A missing file is
/// reported, not fatal to the rest of the run.
fn remove_artifact(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => println!("{} deleted", path.display()),
        Err(err) => eprintln!("cannot delete {}: {err}", path.display()),
    }
}

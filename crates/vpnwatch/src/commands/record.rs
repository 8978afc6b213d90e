//! Record handler: collect one reading, append it to the daily record,
//! and mail the plain-text report.

use vpnwatch_core::{DailyRecord, Mailer, Reading};

use crate::cli::{GlobalOpts, RecordArgs};
use crate::config;
use crate::error::CliError;

pub fn handle(args: RecordArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let name = config::active_profile_name(global, &cfg);
    let profile = config::require_profile(&cfg, &name)?;
    let device = config::resolve_device(profile, &name, &cfg.defaults)?;

    let reading = Reading::collect(&device)?;
    println!("Current Remote Users: {}", reading.current_users);
    println!("Peak number of users: {}", reading.peak_users);

    let record = DailyRecord::new(config::log_dir(args.log_dir, &cfg.defaults));
    let path = record.append(&reading)?;
    println!("Appended to {}", path.display());

    if args.no_mail {
        return Ok(());
    }
    match profile.mail.as_ref() {
        None => {
            tracing::info!("no mail settings for profile '{name}'; skipping report mail");
        }
        Some(mail) => {
            let mailer = Mailer::new(config::resolve_mail(mail, &name)?);
            // A failed send is logged, not fatal: the reading is already
            // durable in the daily record.
            match mailer.send_reading(&reading) {
                Ok(()) => println!("email sent"),
                Err(err) => eprintln!("error sending mail: {err}"),
            }
        }
    }
    Ok(())
}

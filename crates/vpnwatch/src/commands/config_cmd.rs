//! Config subcommand handlers.

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, MailSettings, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    if let Some(ref dir) = cfg.defaults.log_dir {
        let _ = writeln!(out, "log_dir = \"{}\"", dir.display());
    }
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "host = \"{}\"", p.host);
        let _ = writeln!(out, "port = {}", p.port);
        let _ = writeln!(out, "username = \"{}\"", p.username);
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(warning) = p.warning {
            let _ = writeln!(out, "warning = {warning}");
        }
        if let Some(critical) = p.critical {
            let _ = writeln!(out, "critical = {critical}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(ref mail) = p.mail {
            let _ = writeln!(out);
            let _ = writeln!(out, "[profiles.{name}.mail]");
            let _ = writeln!(out, "relay_host = \"{}\"", mail.relay_host);
            let _ = writeln!(out, "relay_port = {}", mail.relay_port);
            let _ = writeln!(out, "username = \"{}\"", mail.username);
            if mail.password.is_some() {
                let _ = writeln!(out, "password = \"****\"");
            }
            if let Some(ref env) = mail.password_env {
                let _ = writeln!(out, "password_env = \"{env}\"");
            }
            let _ = writeln!(out, "from = \"{}\"", mail.from);
            let quoted: Vec<String> = mail.recipients.iter().map(|r| format!("\"{r}\"")).collect();
            let _ = writeln!(out, "recipients = [{}]", quoted.join(", "));
        }
    }

    out
}

/// Delegate to the shared config crate's save function.
fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Offer to store a secret in the system keyring or return it for
/// plaintext config. Returns `Some(secret)` for plaintext, `None` when
/// stored in the keyring.
fn prompt_keyring_storage(
    secret: &str,
    keyring_key: &str,
    prompt: &str,
    label: &str,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt(prompt)
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        store_in_keyring(keyring_key, secret, label)?;
        eprintln!("   ✓ {label} stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(secret.to_owned()))
    }
}

fn store_in_keyring(key: &str, secret: &str, label: &str) -> Result<(), CliError> {
    let entry =
        keyring::Entry::new(config::KEYRING_SERVICE, key).map_err(|e| CliError::Validation {
            field: "keyring".into(),
            reason: format!("failed to access keyring: {e}"),
        })?;
    entry
        .set_password(secret)
        .map_err(|e| CliError::Validation {
            field: "keyring".into(),
            reason: format!("failed to store {label} in keyring: {e}"),
        })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("vpnwatch — configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let host: String = Input::new()
                .with_prompt("Gateway hostname or IP")
                .interact_text()
                .map_err(prompt_err)?;

            let username: String = Input::new()
                .with_prompt("Gaia user name")
                .interact_text()
                .map_err(prompt_err)?;

            let pass = rpassword::prompt_password("Gaia password: ").map_err(prompt_err)?;
            if host.is_empty() || username.is_empty() || pass.is_empty() {
                return Err(CliError::Validation {
                    field: "credentials".into(),
                    reason: "host, user name, and password cannot be empty".into(),
                });
            }

            let password = prompt_keyring_storage(
                &pass,
                &format!("{profile_name}/password"),
                "Where to store the password?",
                "Password",
            )?;

            let profile = Profile {
                host,
                username,
                password,
                ..Profile::default()
            };

            let mut cfg = Config {
                default_profile: Some(profile_name.clone()),
                ..Config::default()
            };
            cfg.profiles.insert(profile_name.clone(), profile);

            save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: vpnwatch record --no-mail");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(&format_config_redacted(&cfg), global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg
                .profiles
                .entry(profile_name.clone())
                .or_insert_with(Profile::default);

            set_profile_key(profile, &key, value)?;

            save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: vpnwatch config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name =
                profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            let prof = cfg.profiles.get(&profile_name).ok_or_else(|| {
                CliError::ProfileNotFound {
                    name: profile_name.clone(),
                    available: config::available_profiles(&cfg),
                }
            })?;

            let store_secret = |key: &str, label: &str| -> Result<(), CliError> {
                let secret = rpassword::prompt_password(label).map_err(prompt_err)?;
                if secret.is_empty() {
                    return Err(CliError::Validation {
                        field: "secret".into(),
                        reason: "value cannot be empty".into(),
                    });
                }
                store_in_keyring(key, &secret, "secret")
            };

            store_secret(&format!("{profile_name}/password"), "Gaia password: ")?;
            if prof.mail.is_some() {
                store_secret(&format!("{profile_name}/relay-password"), "Relay password: ")?;
            }

            eprintln!("✓ Secret(s) stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

/// Apply one `config set` key. Mail keys use a `mail.` prefix and create
/// the mail section on first use.
fn set_profile_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "host" => profile.host = value,
        "port" => profile.port = parse_number(key, &value)?,
        "username" => profile.username = value,
        "password_env" | "password-env" => profile.password_env = Some(value),
        "warning" => profile.warning = Some(parse_number(key, &value)?),
        "critical" => profile.critical = Some(parse_number(key, &value)?),
        "timeout" => profile.timeout = Some(parse_number(key, &value)?),
        "mail.relay_host" | "mail.relay-host" => {
            profile.mail.get_or_insert_with(MailSettings::default).relay_host = value;
        }
        "mail.relay_port" | "mail.relay-port" => {
            profile.mail.get_or_insert_with(MailSettings::default).relay_port =
                parse_number(key, &value)?;
        }
        "mail.username" => {
            profile.mail.get_or_insert_with(MailSettings::default).username = value;
        }
        "mail.password_env" | "mail.password-env" => {
            profile.mail.get_or_insert_with(MailSettings::default).password_env = Some(value);
        }
        "mail.from" => {
            profile.mail.get_or_insert_with(MailSettings::default).from = value;
        }
        "mail.recipients" => {
            profile.mail.get_or_insert_with(MailSettings::default).recipients = value
                .split(',')
                .map(|r| r.trim().to_owned())
                .filter(|r| !r.is_empty())
                .collect();
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: host, port, username, \
                     password_env, warning, critical, timeout, mail.relay_host, \
                     mail.relay_port, mail.username, mail.password_env, mail.from, \
                     mail.recipients"
                ),
            });
        }
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: key.into(),
        reason: "must be a number".into(),
    })
}

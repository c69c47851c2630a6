#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use dialoguer::Select;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::application::context::AppContext;
use crate::application::repl::help_text;
use crate::application::views;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthError;
use crate::domain::models::BackendName;
use crate::domain::models::ImageData;
use crate::domain::models::LabBook;
use crate::domain::models::Language;
use crate::domain::models::OrderStatus;
use crate::domain::models::ProductCategory;
use crate::domain::models::SpeechName;
use crate::domain::models::ALL_CATEGORIES;
use crate::domain::models::LIBRARY_CATEGORIES;
use crate::domain::services::AuthGate;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn print_sessions_list(ctx: &AppContext) -> Result<()> {
    let history = ctx.sessions().load().await;
    let sessions = history
        .latest_first()
        .iter()
        .map(|session| {
            return views::render_session(session);
        })
        .collect::<Vec<String>>();

    if sessions.is_empty() {
        println!("There are no consultations available. You should start your first one!");
    } else {
        println!("{}", sessions.join("\n"));
    }

    return Ok(());
}

/// Interactive picker over stored consultations, newest first.
async fn select_session(ctx: &AppContext, prompt: &str) -> Result<Option<String>> {
    let history = ctx.sessions().load().await;
    let sessions = history.latest_first();

    if sessions.is_empty() {
        println!("There are no consultations available. You should start your first one!");
        return Ok(None);
    }

    let session_options = sessions
        .iter()
        .map(|session| {
            return views::render_session(session);
        })
        .collect::<Vec<String>>();

    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(&session_options)
        .interact_opt()?;

    return Ok(idx.map(|idx| return sessions[idx].id.to_string()));
}

async fn export_session(ctx: &AppContext, session_id: &str, dir: &str) -> Result<()> {
    let history = ctx.sessions().load().await;
    let session = match history.find(session_id) {
        Some(session) => session,
        None => bail!(format!("No consultation found with ID {session_id}")),
    };

    let file_path = ctx
        .renderer
        .transcript(&session.messages, &AppContext::username())?
        .write_to(&path::PathBuf::from(dir))
        .await?;
    println!("Saved {}", file_path.display());

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!(
        "Created default config file at {}",
        config_file_path.display()
    );
    return Ok(());
}

async fn prompt_login(auth: &AuthGate) -> Result<String> {
    loop {
        let identifier: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Usuario")
            .interact_text()?;
        let secret = Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Contraseña")
            .interact()?;

        match auth.login(identifier.trim(), &secret).await {
            Ok(marker) => return Ok(marker.identifier),
            Err(AuthError::InvalidCredentials) => {
                println!("{}", Paint::red(AuthError::InvalidCredentials.to_string()));
            }
            Err(err) => bail!(err),
        }
    }
}

/// Restores a stored login, or asks for credentials until one is accepted.
async fn ensure_login(ctx: &AppContext) -> Result<()> {
    let auth = ctx.auth_gate()?;
    if let Some(marker) = auth.restore().await {
        tracing::debug!(identifier = marker.identifier, "Restored login");
        return Ok(());
    }

    println!("{}", Paint::cyan("DOCTOR IA PRO").bold());
    let identifier = prompt_login(&auth).await?;
    println!("{}", Paint::green(format!("Welcome, {identifier}.")));

    return Ok(());
}

/// Account commands and the data directory lookup work without a login.
/// Everything else reads or writes patient data.
fn needs_login(matches: &ArgMatches) -> bool {
    return match matches.subcommand() {
        Some(("login", _)) | Some(("logout", _)) | Some(("status", _)) => false,
        Some(("sessions", subcmd_matches)) => {
            !matches!(subcmd_matches.subcommand(), Some(("dir", _)) | None)
        }
        _ => true,
    };
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn arg_dir(help: &'static str) -> Arg {
    return Arg::new("dir")
        .short('d')
        .long("dir")
        .help(help)
        .num_args(1)
        .default_value(".");
}

fn arg_session_id() -> Arg {
    return Arg::new(ConfigKey::SessionID.to_string())
        .short('i')
        .long("id")
        .help("Session ID")
        .required(false);
}

fn subcommand_sessions() -> Command {
    return Command::new("sessions")
        .about("Manage past consultations.")
        .arg_required_else_help(true)
        .subcommand(Command::new("dir").about("Print the directory consultations are stored in."))
        .subcommand(Command::new("list").about("List all previous consultations with their ids, newest first."))
        .subcommand(
            Command::new("open")
                .about("Continue a previous consultation by ID. Omit passing any session ID to load an interactive selection.")
                .arg(arg_session_id()),
        )
        .subcommand(
            Command::new("export")
                .about("Export a consultation as a Markdown document. Omit passing any session ID to load an interactive selection.")
                .arg(arg_session_id())
                .arg(arg_dir("Directory the document is written to.")),
        );
}

fn subcommand_scan() -> Command {
    return Command::new("scan")
        .about("Runs a biometric and dermatological scan on a face photo.")
        .arg(
            Arg::new("image")
                .long("image")
                .help("Path to a PNG, JPEG, WEBP, GIF or HEIC photo.")
                .num_args(1)
                .required(true),
        )
        .arg(
            Arg::new("save")
                .long("save")
                .help("Stores the scan summary as a new consultation.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .help("Writes the full report as a Markdown document to this directory.")
                .num_args(1),
        );
}

fn subcommand_labs() -> Command {
    return Command::new("labs")
        .about("Shows laboratory orders and their results.")
        .arg(
            Arg::new("status")
                .long("status")
                .help("Only list orders with this status.")
                .num_args(1)
                .value_parser(PossibleValuesParser::new(OrderStatus::VARIANTS)),
        )
        .arg(
            Arg::new("id")
                .long("id")
                .help("Shows the results of a single order.")
                .num_args(1),
        );
}

fn subcommand_catalog() -> Command {
    return Command::new("catalog")
        .about("Browse the natural medicine catalog.")
        .arg(
            Arg::new("search")
                .long("search")
                .help("Matches names, scientific names and benefits, ignoring case.")
                .num_args(1),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .help("Only list products in this category.")
                .num_args(1),
        )
        .subcommand(Command::new("add").about("Adds or updates a product interactively."))
        .subcommand(Command::new("reset").about("Discards catalog edits and restores the built-in products."));
}

fn subcommand_vitals() -> Command {
    return Command::new("vitals")
        .about("Live biometric monitor. Values are simulated.")
        .arg(
            Arg::new("ticks")
                .long("ticks")
                .help("Stop after this many readings instead of waiting for Ctrl-C.")
                .num_args(1)
                .value_parser(value_parser!(usize)),
        );
}

fn subcommand_library() -> Command {
    let categories = [ALL_CATEGORIES]
        .into_iter()
        .chain(LIBRARY_CATEGORIES)
        .collect::<Vec<&str>>();

    return Command::new("library")
        .about("Browse the medical library of videos, guides and images.")
        .arg(
            Arg::new("search")
                .long("search")
                .help("Matches titles and descriptions, ignoring case.")
                .num_args(1),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .help("Only list resources in this category.")
                .num_args(1)
                .default_value(ALL_CATEGORIES)
                .value_parser(PossibleValuesParser::new(categories)),
        );
}

fn arg_backend() -> Arg {
    return Arg::new(ConfigKey::Backend.to_string())
        .short('b')
        .long(ConfigKey::Backend.to_string())
        .env("MEDCHAT_BACKEND")
        .num_args(1)
        .help(format!(
            "The backend hosting the model to consult. [default: {}]",
            Config::default(ConfigKey::Backend)
        ))
        .value_parser(PossibleValuesParser::new(BackendName::VARIANTS))
        .global(true);
}

fn arg_backend_timeout() -> Arg {
    return Arg::new(ConfigKey::BackendTimeout.to_string())
        .long(ConfigKey::BackendTimeout.to_string())
        .env("MEDCHAT_BACKEND_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds for a backend request before giving up. [default: {}]",
            Config::default(ConfigKey::BackendTimeout)
        ))
        .global(true);
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("MEDCHAT_MODEL")
        .num_args(1)
        .help(format!(
            "The Gemini model to consult. [default: {}]",
            Config::default(ConfigKey::Model)
        ))
        .global(true);
}

fn arg_language() -> Arg {
    return Arg::new(ConfigKey::Language.to_string())
        .short('l')
        .long(ConfigKey::Language.to_string())
        .env("MEDCHAT_LANGUAGE")
        .num_args(1)
        .help(format!(
            "Language for speech and new consultations. [default: {}]",
            Config::default(ConfigKey::Language)
        ))
        .value_parser(PossibleValuesParser::new(Language::VARIANTS))
        .global(true);
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start a new consultation.");
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("medchat")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(Command::new("login").about("Signs in and stores the login for later runs."))
        .subcommand(Command::new("logout").about("Forgets the stored login."))
        .subcommand(Command::new("status").about("Shows whether a stored login is active."))
        .subcommand(subcommand_sessions())
        .subcommand(subcommand_scan())
        .subcommand(subcommand_labs())
        .subcommand(Command::new("calendar").about("Weekly appointment agenda."))
        .subcommand(Command::new("dental").about("Interactive odontogram for a single visit."))
        .subcommand(
            Command::new("prescription")
                .about("Fills in a prescription and writes it as a Markdown document.")
                .arg(arg_dir("Directory the prescription is written to.")),
        )
        .subcommand(subcommand_catalog())
        .subcommand(subcommand_vitals())
        .subcommand(Command::new("antidoping").about("Workplace drug testing log with result statistics."))
        .subcommand(subcommand_library())
        .subcommand(Command::new("eye").about("Ophthalmology exam: visual acuity, refraction and intraocular pressure."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(arg_backend())
        .arg(arg_backend_timeout())
        .arg(arg_model())
        .arg(arg_language())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("MEDCHAT_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::DataDir.to_string())
                .long(ConfigKey::DataDir.to_string())
                .env("MEDCHAT_DATA_DIR")
                .num_args(1)
                .help(format!("Directory consultations, logins and catalog edits are stored in. [default: {}]", Config::default(ConfigKey::DataDir)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("MEDCHAT_GEMINI_URL")
                .num_args(1)
                .help(format!("Gemini API URL. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::GeminiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiToken.to_string())
                .long(ConfigKey::GeminiToken.to_string())
                .env("MEDCHAT_GEMINI_TOKEN")
                .num_args(1)
                .help("Gemini API key when using the Gemini backend.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::MockFallback.to_string())
                .long(ConfigKey::MockFallback.to_string())
                .env("MEDCHAT_MOCK_FALLBACK")
                .num_args(1)
                .help(format!("Answer with canned responses when the Gemini backend fails. [default: {}]", Config::default(ConfigKey::MockFallback)))
                .value_parser(PossibleValuesParser::new(["true", "false"]))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::FallbackFile.to_string())
                .long(ConfigKey::FallbackFile.to_string())
                .env("MEDCHAT_FALLBACK_FILE")
                .num_args(1)
                .help("TOML file with a 'responses' array replacing the built-in canned responses.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Speaker.to_string())
                .long(ConfigKey::Speaker.to_string())
                .env("MEDCHAT_SPEAKER")
                .num_args(1)
                .help(format!("Text to speech engine for replies. [default: {}]", Config::default(ConfigKey::Speaker)))
                .value_parser(PossibleValuesParser::new(SpeechName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SpeakerCommand.to_string())
                .long(ConfigKey::SpeakerCommand.to_string())
                .env("MEDCHAT_SPEAKER_COMMAND")
                .num_args(1)
                .help("Command reading text from stdin aloud, used by the command speaker. MEDCHAT_SPEECH_LOCALE holds the locale.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ListenerCommand.to_string())
                .long(ConfigKey::ListenerCommand.to_string())
                .env("MEDCHAT_LISTENER_COMMAND")
                .num_args(1)
                .help("Command recording speech and printing the transcription to stdout. MEDCHAT_SPEECH_LOCALE holds the locale.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Credentials.to_string())
                .long(ConfigKey::Credentials.to_string())
                .env("MEDCHAT_CREDENTIALS")
                .num_args(1)
                .help(format!("Comma separated user:password pairs accepted at login. [default: {}]", Config::default(ConfigKey::Credentials)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::AuthTtlHours.to_string())
                .long(ConfigKey::AuthTtlHours.to_string())
                .env("MEDCHAT_AUTH_TTL_HOURS")
                .num_args(1)
                .help(format!("Hours a stored login stays valid. [default: {}]", Config::default(ConfigKey::AuthTtlHours)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("MEDCHAT_USERNAME")
                .num_args(1)
                .help("Name shown on your messages and exported documents. [default: $USER]")
                .global(true),
        );
}

async fn run_sessions(ctx: &AppContext, matches: &ArgMatches) -> Result<bool> {
    match matches.subcommand() {
        Some(("dir", _)) => {
            println!("{}", AppContext::data_dir().display());
        }
        Some(("list", _)) => {
            print_sessions_list(ctx).await?;
        }
        Some(("open", open_matches)) => {
            if open_matches
                .get_one::<String>(&ConfigKey::SessionID.to_string())
                .is_some()
            {
                return Ok(true);
            }

            if let Some(session_id) =
                select_session(ctx, "Which consultation would you like to continue?").await?
            {
                Config::set(ConfigKey::SessionID, &session_id);
                return Ok(true);
            }
        }
        Some(("export", export_matches)) => {
            let dir = export_matches
                .get_one::<String>("dir")
                .map(|e| return e.to_string())
                .unwrap_or_else(|| return ".".to_string());

            let session_id = match export_matches
                .get_one::<String>(&ConfigKey::SessionID.to_string())
            {
                Some(session_id) => Some(session_id.to_string()),
                None => select_session(ctx, "Which consultation would you like to export?").await?,
            };

            if let Some(session_id) = session_id {
                export_session(ctx, &session_id, &dir).await?;
            }
        }
        _ => {
            subcommand_sessions().print_long_help()?;
        }
    }

    return Ok(false);
}

async fn run_scan(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let image_path = match matches.get_one::<String>("image") {
        Some(image_path) => path::PathBuf::from(image_path),
        None => bail!("--image is required"),
    };
    let image = ImageData::from_path(&image_path).await?;

    let backend = ctx.backend().await?;
    println!("{}", Paint::new("Scanning...").dimmed());
    let scan = ctx.scanner(backend.clone()).analyze(image).await;
    println!("{}", scan.summary());

    if matches.get_flag("save") {
        let mut chat = ctx.chat(backend).await?;
        chat.record_scan(&scan).await;
        if let Some(session_id) = chat.session_id() {
            println!("Saved as consultation {session_id}");
        }
    }

    if let Some(dir) = matches.get_one::<String>("export") {
        let file_path = ctx
            .renderer
            .scan(&scan)?
            .write_to(&path::PathBuf::from(dir))
            .await?;
        println!("Saved {}", file_path.display());
    }

    return Ok(());
}

fn run_labs(matches: &ArgMatches) -> Result<()> {
    let labs = LabBook::default();

    if let Some(id) = matches.get_one::<String>("id") {
        match labs.find(id) {
            Some(order) => println!("{}", views::render_lab_order(order)),
            None => bail!(format!("No laboratory order found with ID {id}")),
        }
        return Ok(());
    }

    let orders = match matches.get_one::<String>("status") {
        Some(status) => match OrderStatus::parse(status.to_string()) {
            Some(status) => labs.with_status(status),
            None => bail!(format!("Unsupported order status '{status}'")),
        },
        None => labs.orders().iter().collect(),
    };
    println!("{}", views::render_lab_orders(&orders));

    return Ok(());
}

async fn run_catalog(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let store = ctx.catalog();

    match matches.subcommand() {
        Some(("add", _)) => {
            views::catalog_form(&store, &ctx.ids()).await?;
        }
        Some(("reset", _)) => {
            store.reset().await?;
            println!("Catalog restored to the built-in products.");
        }
        _ => {
            let category = match matches.get_one::<String>("category") {
                Some(name) => match ProductCategory::parse(name) {
                    Some(category) => Some(category),
                    None => bail!(format!("Unsupported product category '{name}'")),
                },
                None => None,
            };
            let term = matches
                .get_one::<String>("search")
                .map(|e| return e.to_string())
                .unwrap_or_default();

            views::catalog_list(&store, &term, category).await?;
        }
    }

    return Ok(());
}

/// Parses arguments and runs one shot subcommands. Returns true when the
/// interactive chat should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {}
    }

    let mut arg_matches = vec![&matches];
    if let Some((_, subcmd_matches)) = matches.subcommand() {
        arg_matches.push(subcmd_matches);
        if let Some((_, nested_matches)) = subcmd_matches.subcommand() {
            arg_matches.push(nested_matches);
        }
    }
    Config::load(build(), arg_matches).await?;
    let ctx = AppContext::from_config();
    if needs_login(&matches) {
        ensure_login(&ctx).await?;
    }

    match matches.subcommand() {
        Some(("login", _)) => {
            let auth = ctx.auth_gate()?;
            let identifier = prompt_login(&auth).await?;
            println!("{}", Paint::green(format!("Logged in as {identifier}.")));
        }
        Some(("logout", _)) => {
            ctx.auth_gate()?.logout().await;
            println!("Logged out.");
        }
        Some(("status", _)) => match ctx.auth_gate()?.restore().await {
            Some(marker) => println!("Logged in as {}.", marker.identifier),
            None => println!("Not logged in."),
        },
        Some(("sessions", subcmd_matches)) => {
            return run_sessions(&ctx, subcmd_matches).await;
        }
        Some(("scan", subcmd_matches)) => {
            run_scan(&ctx, subcmd_matches).await?;
        }
        Some(("labs", subcmd_matches)) => {
            run_labs(subcmd_matches)?;
        }
        Some(("calendar", _)) => {
            views::calendar_form(&ctx.ids())?;
        }
        Some(("dental", _)) => {
            views::dental_form()?;
        }
        Some(("prescription", subcmd_matches)) => {
            let dir = subcmd_matches
                .get_one::<String>("dir")
                .map(|e| return e.to_string())
                .unwrap_or_else(|| return ".".to_string());
            views::prescription_form(&ctx.ids(), &ctx.renderer, &path::PathBuf::from(dir))
                .await?;
        }
        Some(("catalog", subcmd_matches)) => {
            run_catalog(&ctx, subcmd_matches).await?;
        }
        Some(("vitals", subcmd_matches)) => {
            views::vitals_monitor(subcmd_matches.get_one::<usize>("ticks").copied()).await?;
        }
        Some(("antidoping", _)) => {
            views::antidoping_form(&ctx.ids())?;
        }
        Some(("library", subcmd_matches)) => {
            let term = subcmd_matches
                .get_one::<String>("search")
                .map(|e| return e.to_string())
                .unwrap_or_default();
            let category = subcmd_matches
                .get_one::<String>("category")
                .map(|e| return e.to_string())
                .unwrap_or_else(|| return ALL_CATEGORIES.to_string());
            views::library_form(&ctx.ids(), &term, &category)?;
        }
        Some(("eye", _)) => {
            views::eye_exam_form()?;
        }
        _ => {
            return Ok(true);
        }
    }

    return Ok(false);
}

#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use log::{info, error, LevelFilter};
use serde::Deserialize;
use std::fs;
use lazy_static::lazy_static;
use structopt::StructOpt;

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;

// Hello Utilities
use crate::utils::{hello_utils, errors::Errors};

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Networking.  The server listens on all interfaces at a fixed port unless
// a configuration file says otherwise.
const DEFAULT_HTTP_ADDR    : &str = "0.0.0.0";
const DEFAULT_HTTP_PORT    : u16  = 8080;
const DEFAULT_TITLE        : &str = "Hello Server";

// Console logging used when no log4rs file is given.
const CONSOLE_APPENDER     : &str = "stdout";
const CONSOLE_PATTERN      : &str = "{d(%Y-%m-%dT%H:%M:%S%.6fZ)(utc)} {h({l})} {t} - {m}{n}";

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE the runtime context is initialized in main.
lazy_static! {
    pub static ref HELLO_ARGS: HelloArgs = init_hello_args();
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// HelloArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, Default, StructOpt)]
#[structopt(name = "hello_server", about = "Command line arguments for the Hello Server.")]
pub struct HelloArgs {
    /// Path to a TOML configuration file.
    ///
    /// When omitted, or when the file cannot be read, the server listens
    /// on 0.0.0.0:8080.
    #[structopt(short, long)]
    pub config: Option<String>,

    /// Path to a log4rs YAML configuration file.
    ///
    /// When omitted, log records at info level and above go to stdout.
    #[structopt(short, long)]
    pub log_config: Option<String>,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub hello_args: &'static HelloArgs,
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    /// The socket address the server binds.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.http_addr, self.http_port)
    }

    /// The server url advertised in the generated openapi document.
    pub fn server_url(&self) -> String {
        format!("http://{}", self.listen_addr())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

// ***************************************************************************
//                            Argument Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_hello_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_hello_args() -> HelloArgs {
    HelloArgs::from_args()
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs logging from the given YAML file or, if none is given,
 * with a console appender.  Returns a description of the configuration used.
 */
pub fn init_log(log_config: Option<&str>) -> Result<String> {
    match log_config {
        Some(file) => {
            let logconfig = hello_utils::get_absolute_path(file);
            if let Err(e) = log4rs::init_file(&logconfig, Default::default()) {
                return Result::Err(anyhow!("{}\n   {}", Errors::Log4rsInitialization(logconfig), e));
            }
            info!("Log4rs initialized using: {}", logconfig);
            Ok(logconfig)
        },
        None => {
            let logconfig = "console defaults".to_string();
            let config = match console_log_config() {
                Ok(c) => c,
                Err(e) => return Result::Err(anyhow!("{}\n   {}", Errors::Log4rsInitialization(logconfig), e)),
            };
            if let Err(e) = log4rs::init_config(config) {
                return Result::Err(anyhow!("{}\n   {}", Errors::Log4rsInitialization(logconfig), e));
            }
            info!("Log4rs initialized using: {}", logconfig);
            Ok(logconfig)
        },
    }
}

// ---------------------------------------------------------------------------
// console_log_config:
// ---------------------------------------------------------------------------
fn console_log_config() -> Result<LogConfig> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();

    let config = LogConfig::builder()
        .appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(stdout)))
        .build(Root::builder().appender(CONSOLE_APPENDER).build(LevelFilter::Info))?;
    Ok(config)
}

// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file named on
 * the command line.  If no file is named, or the named file cannot be read,
 * the default configuration is used.  A file that exists but is not valid
 * TOML is an error.
 */
pub fn get_parms(args: &HelloArgs) -> Result<Parms> {
    // No file means defaults.
    let config_file = match &args.config {
        Some(f) => f,
        None => return Ok(Parms { config_file: Default::default(), config: Config::new() }),
    };

    // Read the configuration file.
    let config_file_abs = hello_utils::get_absolute_path(config_file);
    info!("{}", Errors::ReadingConfigFile(config_file_abs.clone()));
    let contents = match fs::read_to_string(&config_file_abs) {
        Ok(c) => c,
        Err(_) => {
            println!("Unable to read configuration at {}. Using default values.", config_file_abs);
            return Ok(Parms { config_file: Default::default(), config: Config::new() });
        }
    };

    // Parse the toml configuration.
    let config : Config = match toml::from_str(&contents) {
        Ok(c)  => c,
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file_abs), e);
            error!("{}", msg);
            return Result::Err(anyhow!(msg));
        }
    };

    Ok(Parms { config_file: config_file_abs, config })
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
/** Parse the command line and read the configuration it names. */
pub fn init_runtime_context() -> Result<RuntimeCtx> {
    let parms = get_parms(&HELLO_ARGS)?;
    Ok(RuntimeCtx {parms, hello_args: &HELLO_ARGS})
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use std::fs;
    use structopt::StructOpt;
    use crate::utils::config::{get_parms, Config, HelloArgs};

    // Write a uniquely named file under the system temp directory.
    fn write_temp(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir()
            .join(format!("cicd_hello_{}_{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn default_config() {
        let config = Config::new();
        assert_eq!(config.http_addr, "0.0.0.0");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.server_url(), "http://0.0.0.0:8080");
    }

    #[test]
    fn no_args_uses_defaults() {
        let args = HelloArgs::from_iter(["hello_server"]);
        assert!(args.config.is_none());
        assert!(args.log_config.is_none());

        let parms = get_parms(&args).unwrap();
        assert_eq!(parms.config, Config::default());
        assert!(parms.config_file.is_empty());
    }

    #[test]
    fn parse_args() {
        let args = HelloArgs::from_iter(
            ["hello_server", "--config", "/tmp/hello.toml", "--log-config", "/tmp/log4rs.yml"]);
        assert_eq!(args.config.as_deref(), Some("/tmp/hello.toml"));
        assert_eq!(args.log_config.as_deref(), Some("/tmp/log4rs.yml"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let args = HelloArgs { config: Some("/nonexistent/cicd_hello/hello.toml".to_string()),
                               log_config: None };
        let parms = get_parms(&args).unwrap();
        assert_eq!(parms.config, Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_temp("partial.toml", "http_port = 9090\n");
        let args = HelloArgs { config: Some(file.clone()), log_config: None };
        let parms = get_parms(&args).unwrap();
        fs::remove_file(&file).unwrap();

        assert_eq!(parms.config_file, file);
        assert_eq!(parms.config.http_port, 9090);
        assert_eq!(parms.config.http_addr, "0.0.0.0");
        assert_eq!(parms.config.title, "Hello Server");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_temp("bad.toml", "http_port = \"not a number\"\n");
        let args = HelloArgs { config: Some(file.clone()), log_config: None };
        let result = get_parms(&args);
        fs::remove_file(&file).unwrap();

        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("Unable to parse TOML file"), "{}", msg);
    }
}

use crate::constants::{DEFAULT_HOST, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_TOTAL_SIZE, DEFAULT_PORT};
use clap::{Arg, ArgMatches, Command};
use std::ffi::OsString;

/// Size limits applied to create requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// Largest accepted image part
    pub max_file_size: u64,
    /// Largest accepted multipart body
    pub max_total_size: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_total_size: DEFAULT_MAX_TOTAL_SIZE,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Create request limits
    pub limits: UploadLimits,
}

impl ServerConfig {
    /// Load from the process arguments and environment
    pub fn load() -> Result<Self, std::io::Error> {
        Self::load_from(std::env::args_os(), |name| std::env::var(name).ok())
    }

    /// Load from explicit arguments and an environment lookup.
    /// Priority: command-line args > environment variables > defaults
    pub fn load_from<I, T>(
        args: I,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, std::io::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command()
            .try_get_matches_from(args)
            .map_err(|e| invalid_input(e.to_string()))?;

        let env_host = env("SERVER_HOST");
        let env_port = env("SERVER_PORT");

        let host = matches
            .get_one::<String>("host")
            .map(|s| s.as_str())
            .or(env_host.as_deref())
            .unwrap_or(DEFAULT_HOST)
            .to_string();

        let port_str = matches
            .get_one::<String>("port")
            .map(|s| s.as_str())
            .or(env_port.as_deref())
            .unwrap_or(DEFAULT_PORT);

        let port = port_str
            .parse()
            .map_err(|_| invalid_input(format!("Invalid port number: {}", port_str)))?;

        let limits = UploadLimits {
            max_file_size: parse_size(&matches, "max-file-size")?
                .unwrap_or(DEFAULT_MAX_FILE_SIZE),
            max_total_size: match parse_size(&matches, "max-total-size")? {
                Some(size) => usize::try_from(size)
                    .map_err(|_| invalid_input(format!("Invalid total size: {}", size)))?,
                None => DEFAULT_MAX_TOTAL_SIZE,
            },
        };

        Ok(ServerConfig { host, port, limits })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn command() -> Command {
    Command::new("inspection-server")
        .about("Development backend for image inspections")
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .help("Server port (default: 3001, or SERVER_PORT env var)"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Server host (default: 0.0.0.0, or SERVER_HOST env var)"),
        )
        .arg(
            Arg::new("max-file-size")
                .long("max-file-size")
                .value_name("BYTES")
                .help("Largest accepted image in bytes (default: 5 MiB)"),
        )
        .arg(
            Arg::new("max-total-size")
                .long("max-total-size")
                .value_name("BYTES")
                .help("Largest accepted request body in bytes (default: 50 MiB)"),
        )
}

fn parse_size(matches: &ArgMatches, name: &str) -> Result<Option<u64>, std::io::Error> {
    let Some(value) = matches.get_one::<String>(name) else {
        return Ok(None);
    };
    match value.parse::<u64>() {
        Ok(size) if size > 0 => Ok(Some(size)),
        _ => Err(invalid_input(format!("Invalid --{}: {}", name, value))),
    }
}

fn invalid_input(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, message)
}

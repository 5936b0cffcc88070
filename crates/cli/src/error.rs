use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No command was given. Use `--list` to see the available commands.")]
    MissingCommand,

    #[error("Unknown command: `{}`", .0)]
    CommandNotFound(String),

    #[error("Error writing declaration of `{}`: {}", .command, .original)]
    Describe {
        command: String,
        original: serde_yaml::Error,
    },

    #[error(transparent)]
    Bind(#[from] argbind_core::error::Error),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn describe_error(command: &str, original: serde_yaml::Error) -> Self {
        Self::Describe {
            command: command.to_string(),
            original,
        }
    }
}

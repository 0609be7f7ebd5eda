use sandbox_core::SandboxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Sandbox(#[from] SandboxError),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success (including an empty payload)
    // 11: config error
    // 20: payload file could not be opened or written
    // 21: stdin read failure
    // 30: payload could not be executed
    // 31: payload output could not be read or forwarded
    // 124: payload timed out
    match e {
        CliError::Config(_) => 11,
        CliError::Io(_) => 20,
        CliError::Sandbox(se) => match se {
            SandboxError::Config(_) => 11,
            SandboxError::StorageOpen { .. } | SandboxError::StorageWrite { .. } => 20,
            SandboxError::InputRead(_) => 21,
            SandboxError::Spawn { .. } => 30,
            SandboxError::OutputRead(_) | SandboxError::OutputWrite(_) | SandboxError::Wait(_) => {
                31
            }
            SandboxError::Timeout { .. } => 124,
        },
    }
}

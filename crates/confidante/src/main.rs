// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Confidante - config files with encrypted secrets.
//!
//! This is the binary entry point for the `confidante` command.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use confidante_config::{DEFAULT_PREFIX, render_error};
use confidante_core::process_env;
use confidante_crypto::KeyMaterial;
use secrecy::SecretString;

/// Confidante - manage configuration files and the secrets inside them.
#[derive(Parser, Debug)]
#[command(name = "confidante", version, about, long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a config file and print it as JSON.
    Load {
        path: PathBuf,
        /// Decrypt marked values before printing (prompts if no key is found).
        #[arg(long)]
        decrypted: bool,
        /// Apply `<PREFIX>__section__key` environment overrides.
        #[arg(long)]
        env: bool,
        /// Prefix for environment overrides.
        #[arg(long, default_value = DEFAULT_PREFIX)]
        env_prefix: String,
        #[command(flatten)]
        keys: KeyArgs,
    },
    /// Sort keys at every level and rewrite the file.
    Tidy { path: PathBuf },
    /// Check that the key decrypts every encrypted value.
    Unlock {
        path: PathBuf,
        /// Prompt for a key if none is supplied.
        #[arg(long)]
        prompt: bool,
        #[command(flatten)]
        keys: KeyArgs,
    },
    /// Encrypt VALUE, store it at KEY_PATH, and save the file.
    EncryptKey {
        path: PathBuf,
        /// Key path segments followed by the value to encrypt.
        #[arg(required = true, num_args = 2.., value_name = "KEY_PATH... VALUE")]
        args: Vec<String>,
        #[command(flatten)]
        keys: KeyArgs,
    },
    /// Check that a config file parses.
    Validate { path: PathBuf },
    /// Print a new random symmetric key.
    Keygen,
}

/// Key material flags shared by commands that unlock.
#[derive(Args, Debug)]
struct KeyArgs {
    /// Symmetric key.
    #[arg(long, allow_hyphen_values = true)]
    key: Option<String>,
    /// PEM private key for asymmetric encryption.
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Passphrase for an encrypted private key.
    #[arg(long, allow_hyphen_values = true)]
    passphrase: Option<String>,
}

impl KeyArgs {
    fn is_empty(&self) -> bool {
        self.key.is_none() && self.private_key_path.is_none()
    }

    fn into_material(self, prompt: bool) -> KeyMaterial {
        KeyMaterial {
            private_key_path: self.private_key_path,
            passphrase: self.passphrase.map(SecretString::from),
            key: self.key.map(SecretString::from),
            prompt,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    // The only read of the process environment; everything below gets it injected.
    let env = process_env();

    let result = match cli.command {
        Commands::Load {
            path,
            decrypted,
            env: overlay,
            env_prefix,
            keys,
        } => {
            let prefix = overlay.then_some(env_prefix.as_str());
            let material = decrypted.then(|| keys.into_material(true));
            commands::load(&path, material.as_ref(), prefix, &env)
        }
        Commands::Tidy { path } => commands::tidy(&path),
        Commands::Unlock { path, prompt, keys } => {
            commands::unlock(&path, &keys.into_material(prompt), &env)
        }
        Commands::EncryptKey { path, args, keys } => {
            let prompt = keys.is_empty();
            commands::encrypt_key(&path, &args, &keys.into_material(prompt), &env)
        }
        Commands::Validate { path } => commands::validate(&path),
        Commands::Keygen => commands::keygen(),
    };

    if let Err(err) = result {
        eprint!("{}", render_error(&err));
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("confidante={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
mod auth;
use cryptkit::{Envelope, KeyKind, KeySource, RandomEncoding, generate, random_value};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cryptkit")]
#[command(
    version,
    about = "Offline cryptographic toolkit: encrypt, hash, generate keys and random values."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encrypts text into a self-describing JSON envelope
    #[command(arg_required_else_help = true)]
    Encrypt {
        /// Literal text to encrypt
        text: Option<String>,

        /// Read the plaintext from a file instead
        #[arg(long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Raw 256-bit key as 64 hex characters; without it a password is read
        #[arg(long, value_name = "HEX")]
        key: Option<String>,

        /// PBKDF2 iteration count (never used below the 600000 default)
        #[arg(long)]
        iterations: Option<u32>,
    },

    /// Decrypts an envelope produced by encrypt
    #[command(arg_required_else_help = true)]
    Decrypt {
        /// Envelope JSON
        envelope: Option<String>,

        /// Read the envelope JSON from a file instead
        #[arg(long, value_name = "PATH", conflicts_with = "envelope")]
        file: Option<PathBuf>,

        /// Raw 256-bit key as 64 hex characters; without it a password is read
        #[arg(long, value_name = "HEX")]
        key: Option<String>,
    },

    /// Hashes data or a file's contents
    #[command(arg_required_else_help = true)]
    Hash {
        /// Literal data to hash
        data: Option<String>,

        /// Read the data from a file instead
        #[arg(long, value_name = "PATH", conflicts_with = "data")]
        file: Option<PathBuf>,

        /// sha256, sha384 or sha512
        #[arg(long, default_value = "sha256")]
        algorithm: String,

        /// hex, base64 or base64url
        #[arg(long, default_value = "hex")]
        encoding: String,
    },

    /// Computes a keyed HMAC over data or a file's contents
    #[command(arg_required_else_help = true)]
    Hmac {
        /// Literal data to authenticate
        data: Option<String>,

        /// Read the data from a file instead
        #[arg(long, value_name = "PATH", conflicts_with = "data")]
        file: Option<PathBuf>,

        /// MAC key
        #[arg(long)]
        key: String,

        /// sha256, sha384 or sha512
        #[arg(long, default_value = "sha256")]
        algorithm: String,

        /// hex, base64 or base64url
        #[arg(long, default_value = "hex")]
        encoding: String,
    },

    /// Generates key material
    Generate {
        #[command(subcommand)]
        kind: GenerateKind,
    },

    /// Emits cryptographically secure random values
    Random {
        /// Bytes per value
        #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(1..=1024))]
        bytes: u16,

        /// hex, base64, base64url, binary, decimal, uuid or passphrase
        #[arg(long, default_value = "hex")]
        encoding: String,

        /// How many values to emit, one per line
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=100))]
        count: u8,
    },
}

#[derive(Debug, Subcommand)]
enum GenerateKind {
    /// Random AES key (128, 192 or 256 bits)
    Symmetric {
        #[arg(long, default_value_t = 256)]
        bits: u32,
    },

    /// RSA key pair, PKCS#8 private / SPKI public PEM (2048 or 4096 bits)
    Rsa {
        #[arg(long, default_value_t = 2048)]
        bits: u32,
    },

    /// ECDSA key pair on a named curve (P-256, P-384 or P-521)
    Ecdsa {
        #[arg(long, default_value = "P-256")]
        curve: String,
    },

    /// Ed25519 key pair
    Ed25519,

    /// One-way password hash for storage
    PasswordHash,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encrypt {
            text,
            file,
            key,
            iterations,
        } => {
            let plaintext = read_text_input(text, file)?;
            let source = resolve_key_source(key, iterations)?;
            let envelope = Envelope::encrypt(&plaintext, &source)?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }

        Commands::Decrypt {
            envelope,
            file,
            key,
        } => {
            let raw = read_text_input(envelope, file)?;
            let envelope: Envelope =
                serde_json::from_str(&raw).context("envelope is not valid JSON")?;
            let source = resolve_key_source(key, None)?;
            println!("{}", envelope.decrypt(&source)?);
        }

        Commands::Hash {
            data,
            file,
            algorithm,
            encoding,
        } => {
            let data = read_bytes_input(data, file)?;
            println!(
                "{}",
                cryptkit::hash(&data, algorithm.parse()?, encoding.parse()?)
            );
        }

        Commands::Hmac {
            data,
            file,
            key,
            algorithm,
            encoding,
        } => {
            let data = read_bytes_input(data, file)?;
            println!(
                "{}",
                cryptkit::hmac(&data, key.as_bytes(), algorithm.parse()?, encoding.parse()?)?
            );
        }

        Commands::Generate { kind } => {
            let kind = match kind {
                GenerateKind::Symmetric { bits } => KeyKind::Symmetric { bits },
                GenerateKind::Rsa { bits } => KeyKind::Rsa { bits },
                GenerateKind::Ecdsa { curve } => KeyKind::Ecdsa { curve },
                GenerateKind::Ed25519 => KeyKind::Ed25519,
                GenerateKind::PasswordHash => KeyKind::PasswordHash {
                    password: auth::read_password()?,
                },
            };
            println!("{}", serde_json::to_string_pretty(&generate(&kind)?)?);
        }

        Commands::Random {
            bytes,
            encoding,
            count,
        } => {
            let encoding: RandomEncoding = encoding.parse()?;
            for _ in 0..count {
                println!("{}", random_value(usize::from(bytes), encoding)?);
            }
        }
    }

    Ok(())
}

fn resolve_key_source(key: Option<String>, iterations: Option<u32>) -> Result<KeySource> {
    match key {
        Some(hex_key) => Ok(KeySource::RawHex(hex_key)),
        None => Ok(KeySource::Password {
            password: auth::read_password()?,
            iterations,
        }),
    }
}

fn read_text_input(literal: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (literal, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("cannot read file '{}'", path.display())),
        (None, None) => bail!("no input given: pass a literal argument or --file"),
    }
}

fn read_bytes_input(literal: Option<String>, file: Option<PathBuf>) -> Result<Vec<u8>> {
    match (literal, file) {
        (Some(text), _) => Ok(text.into_bytes()),
        (None, Some(path)) => {
            fs::read(&path).with_context(|| format!("cannot read file '{}'", path.display()))
        }
        (None, None) => bail!("no input given: pass a literal argument or --file"),
    }
}

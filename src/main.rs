use anyhow::Context;
use clap::{Parser, Subcommand};
use msgtext::{
    quote::{self, terminated_str, QuoteString},
    trace::TraceContext,
    url::UrlComponents,
    utils::{env_bool, Logger},
    QuoteError,
};

/// Set to a true value (`1`, `true`, `yes`, `on`) to log trace events.
const TRACE_ENV: &str = "MSGTEXT_TRACE";

#[derive(Parser)]
#[command(name = "msgtext", version, about = "Quote binary data and split connection URLs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Quote input, escaping non-printable bytes as \xHH
    Quote {
        /// Treat the input as hex-encoded bytes
        #[arg(long)]
        hex: bool,
        /// Quote into a fixed buffer of this many bytes instead of growing
        #[arg(long)]
        capacity: Option<usize>,
        input: String,
    },
    /// Print input the way diagnostics do, truncated to 256 bytes
    Print {
        /// Treat the input as hex-encoded bytes
        #[arg(long)]
        hex: bool,
        input: String,
    },
    /// Split a connection URL into its components
    ParseUrl {
        /// Emit the components as JSON
        #[arg(long)]
        json: bool,
        url: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logger = Logger::from_env();
    let tracer = if env_bool(TRACE_ENV) {
        TraceContext::logging(logger.clone())
    } else {
        TraceContext::disabled()
    };

    match cli.command {
        Command::Quote {
            hex,
            capacity,
            input,
        } => {
            let bytes = input_bytes(&input, hex)?;
            match capacity {
                Some(capacity) => quote_bounded(&logger, &tracer, &bytes, capacity),
                None => quote_growable(&tracer, &bytes),
            }
        }
        Command::Print { hex, input } => {
            let bytes = input_bytes(&input, hex)?;
            quote::print_data(&bytes).context("failed to print data")?;
            println!();
            Ok(())
        }
        Command::ParseUrl { json, url } => print_url_components(&tracer, &url, json),
    }
}

fn input_bytes(input: &str, hex: bool) -> anyhow::Result<Vec<u8>> {
    if hex {
        hex::decode(input).context("input is not valid hex")
    } else {
        Ok(input.as_bytes().to_vec())
    }
}

/// quote --capacity N <input>
fn quote_bounded(
    logger: &Logger,
    tracer: &TraceContext,
    bytes: &[u8],
    capacity: usize,
) -> anyhow::Result<()> {
    tracer.entry("quote_data");
    tracer.data("capacity", capacity);

    let mut buf = vec![0u8; capacity];
    match quote::quote_data(&mut buf, bytes) {
        Ok(written) => {
            tracer.exit("quote_data", written);
            println!("{}", terminated_str(&buf));
        }
        Err(QuoteError::Overflow) => {
            tracer.exit("quote_data", QuoteError::Overflow.code());
            logger.warn(
                "quote",
                &format!("output truncated to fit a {} byte buffer", capacity),
            );
            println!("{}", terminated_str(&buf));
        }
        Err(err) => return Err(err).context("quoting failed"),
    }
    Ok(())
}

/// quote <input>
fn quote_growable(tracer: &TraceContext, bytes: &[u8]) -> anyhow::Result<()> {
    tracer.entry("quote");
    tracer.data("len", bytes.len());

    let mut out = QuoteString::new();
    quote::quote(&mut out, bytes).context("quoting failed")?;

    tracer.exit("quote", out.len());
    println!("{}", out);
    Ok(())
}

/// parse-url [--json] <url>
fn print_url_components(tracer: &TraceContext, url: &str, json: bool) -> anyhow::Result<()> {
    tracer.entry("parse_url");
    tracer.data_str("url", Some(url));
    let parts = UrlComponents::parse(url);
    tracer.exit_void("parse_url");

    if json {
        let rendered =
            serde_json::to_string_pretty(&parts).context("failed to serialize components")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("Scheme: {}", parts.scheme.unwrap_or("<unset>"));
    println!("User: {}", parts.user_str().as_deref().unwrap_or("<unset>"));
    println!("Password: {}", parts.pass_str().as_deref().unwrap_or("<unset>"));
    println!("Host: {}", parts.host);
    println!("Port: {}", parts.port.unwrap_or("<unset>"));
    println!("Path: {}", parts.path.unwrap_or("<unset>"));
    Ok(())
}

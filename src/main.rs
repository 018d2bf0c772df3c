use clap::Parser;
use httpfetch::runner::{self, Options};
use std::io;

/// One-shot HTTP request runner.
///
/// Builds a single request from the URL, method, body, and headers flags,
/// sends it, and prints the response body line by line. Failures are
/// reported as printed diagnostics rather than through the exit status.
#[derive(Parser, Debug)]
#[command(name = "httpfetch", version)]
struct Cli {
    /// The URL to be fetched from
    #[arg(long, default_value = "http://httpbin.org/get")]
    url: String,

    /// The HTTP method to be used
    #[arg(long, default_value = "GET")]
    method: String,

    /// The request body (for POST, PUT), as {key1:value1,key2:value2}
    #[arg(long, default_value = "")]
    body: String,

    /// The request headers, as {key1:value1,key2:value2}
    #[arg(long, default_value = "")]
    headers: String,
}

fn main() {
    let cli = Cli::parse();
    let options = Options {
        url: cli.url,
        method: cli.method,
        body: cli.body,
        headers: cli.headers,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    // The only error run() surfaces is stdout itself going away.
    let _ = runner::run(&options, &mut out);
}

//! `hvmd` entrypoint.

use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = hvmd_cli::run().await;
    process::exit(code);
}

/**
 * Stencil Compiler CLI - stencil-config
 *
 * Validates config files and derives transpile configs
 */
use std::process;

fn main() {
    match stencil_compiler_cli::main_entry::main_entry(std::env::args_os()) {
        Ok(code) => process::exit(code),
        Err(err) => {
            // clap renders help and version through its own error type
            if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
                clap_err.exit();
            }
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}

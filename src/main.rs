pub mod ast;
pub mod cli;
pub mod codegen;
pub mod error;
pub mod kinds;
pub mod node;

use colored::Colorize;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

mod cli;
mod keys;
mod merge;
mod resolve;
mod slug;
mod sync;
mod tables;
mod types;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    cli::main()
}

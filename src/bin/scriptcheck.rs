// Thin entry point: all CLI logic lives in the library's cli module.

fn main() -> miette::Result<()> {
    scriptcheck::cli::run()
}

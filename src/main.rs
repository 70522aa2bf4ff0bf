use std::io;

use raum_chess::cli::cli_top::run_stdio_loop;

fn main() -> io::Result<()> {
    run_stdio_loop()
}

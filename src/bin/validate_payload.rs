use std::process::ExitCode;

fn main() -> ExitCode {
    clinic_api::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = clinic_api::cli::run(&args, std::io::stdin().lock());

    if !outcome.stdout.is_empty() {
        println!("{}", outcome.stdout);
    }
    if !outcome.stderr.is_empty() {
        eprintln!("{}", outcome.stderr);
    }

    ExitCode::from(outcome.code)
}

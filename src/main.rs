use bf_machine::cli_util::print_machine_error;
use bf_machine::config::{self, PartialConfig};
use bf_machine::logging::init_logging;
use bf_machine::{ConfigError, EofBehavior, Machine, MachineConfig};
use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(
    name = "bfm",
    version,
    about = "Run a Brainfuck program on a tape of integer cells",
    arg_required_else_help = true,
    after_help = "Notes:\n- `,` reads one byte from stdin (or --input); end of input is an error unless --eof says otherwise.\n- Characters outside of ><+-.,[] are comments.\n- Program output goes to stdout; errors and logs go to stderr (RUST_LOG controls logging)."
)]
struct Cli {
    /// Read Brainfuck code from PATH instead of positional CODE
    #[arg(short = 'f', long = "file", value_name = "PATH", conflicts_with = "code")]
    file: Option<PathBuf>,

    /// Feed `,` from PATH instead of stdin
    #[arg(long = "input", value_name = "PATH")]
    input: Option<PathBuf>,

    /// Number of tape cells (fallback BFM_TAPE_SIZE; default 30000)
    #[arg(long = "tape-size", value_name = "N")]
    tape_size: Option<usize>,

    /// What `,` does at end of input (fallback BFM_EOF; default fail)
    #[arg(long = "eof", value_enum, value_name = "MODE")]
    eof: Option<EofBehavior>,

    /// Precompute bracket pairs instead of scanning on every jump (fallback BFM_JUMP_TABLE)
    #[arg(long = "jump-table")]
    jump_table: bool,

    /// Config file to use instead of bfm.toml in the user config directory
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Brainfuck code; multiple parts are concatenated
    #[arg(value_name = "CODE", trailing_var_arg = true, allow_hyphen_values = true)]
    code: Vec<String>,
}

impl Cli {
    fn overrides(&self) -> PartialConfig {
        PartialConfig {
            tape_size: self.tape_size,
            eof: self.eof,
            jump_table: self.jump_table.then_some(true),
        }
    }
}

/// Flags first, then environment, then the config file.
fn resolve_config(cli: &Cli) -> Result<MachineConfig, ConfigError> {
    let env = PartialConfig::from_env(|key| std::env::var(key).ok())?;
    let file = match cli.config.clone().or_else(config::default_config_path) {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            config::load_config_file(&path)?
        }
        None => PartialConfig::default(),
    };
    cli.overrides().or(env).or(file).finish()
}

fn install_interrupt_handler(program: &str) {
    // Flush whatever the program has printed so far, then exit like a shell would on SIGINT.
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(130);
    }) {
        warn!("{program}: failed to set ctrl+c handler: {e}");
    }
}

fn run(program: &str, cli: Cli) -> u8 {
    if cli.file.is_none() && cli.code.is_empty() {
        eprintln!("{program}: no code given; pass CODE or --file <PATH>");
        return 2;
    }

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{program}: {e}");
            return 2;
        }
    };

    let code = match &cli.file {
        Some(path) => match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{program}: failed to read code file as UTF-8: {e}");
                return 1;
            }
        },
        None => cli.code.join(""),
    };

    let input: Box<dyn Read> = match &cli.input {
        Some(path) => match File::open(path) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => {
                eprintln!("{program}: failed to open input file {}: {e}", path.display());
                return 1;
            }
        },
        None => Box::new(io::stdin()),
    };

    // Execute the original text so that error offsets match the source
    let mut machine = Machine::with_config(code.as_str(), input, io::stdout(), config);
    let result = machine.run();
    let _ = io::stdout().flush();

    match result {
        Ok(()) => {
            // For readability, ensure output ends with a newline
            println!();
            let _ = io::stdout().flush();
            0
        }
        Err(err) => {
            print_machine_error(program, &code, &err);
            1
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    let program = "bfm";
    let cli = Cli::parse();
    install_interrupt_handler(program);

    ExitCode::from(run(program, cli))
}

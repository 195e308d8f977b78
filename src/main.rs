use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use asciify::{Table, TableData, Transliterator};

/// Transliterate Unicode text to ASCII
#[derive(Parser, Debug)]
#[command(name = "asciify")]
#[command(version)]
#[command(about = "Transliterate Unicode text to ASCII", long_about = None)]
struct Args {
    /// Input files; reads stdin when none are given or for "-"
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Text written for characters without a mapping
    #[arg(short, long, default_value = "[?]")]
    placeholder: String,

    /// Directory holding table.bin and blob.bin to use instead of the built-in table
    #[arg(long, value_name = "DIR")]
    table_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        Ok(data)
    } else {
        fs::read(path)
    }
}

fn run(args: &Args) -> asciify::Result<()> {
    let custom_table = args
        .table_dir
        .as_deref()
        .map(|dir| TableData::read_dir(dir))
        .transpose()?;
    let table = match &custom_table {
        Some(data) => data.table(),
        None => *Table::global(),
    };
    let translit = Transliterator::new(table).with_placeholder(args.placeholder.as_bytes());

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let stdin = [PathBuf::from("-")];
    let inputs = if args.inputs.is_empty() {
        &stdin[..]
    } else {
        &args.inputs[..]
    };

    for path in inputs {
        log::debug!("transliterating {}", path.display());
        let data = read_input(path)?;
        let ascii = translit.transliterate(&data)?;
        log::debug!("{} bytes in, {} bytes out", data.len(), ascii.len());
        out.write_all(&ascii)?;
    }

    out.flush()?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

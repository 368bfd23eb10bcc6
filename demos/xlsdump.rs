use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use xlsread::{CellValue, CompoundFile, Entry, OpenOptions};

#[derive(Parser, Debug)]
#[clap(about = "Inspects legacy .xls workbooks", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists the entries of the compound file
    Ls {
        /// Includes sizes and CLSIDs in output
        #[clap(short, long)]
        long: bool,
        path: PathBuf,
    },
    /// Prints the raw contents of one stream
    Cat { path: PathBuf, stream: String },
    /// Prints every sheet with its decoded cells
    Cells {
        /// Codepage for byte strings when the file declares none
        #[clap(short, long, default_value_t = 1252)]
        codepage: u16,
        path: PathBuf,
    },
}

fn list_entry(entry: &Entry, long: bool) {
    if !long {
        println!("{}", entry.name().escape_debug());
        return;
    }
    let length = if entry.len() >= 100_000_000 {
        format!("{} MB", entry.len() / (1 << 20))
    } else if entry.len() >= 1_000_000 {
        format!("{} kB", entry.len() / (1 << 10))
    } else {
        format!("{} B ", entry.len())
    };
    println!(
        "{}{:08x}   {:>10}   {}",
        if entry.is_stream() { '-' } else { '+' },
        entry.state_bits(),
        length,
        entry.name().escape_debug()
    );
    if entry.is_storage() {
        println!(" {}", entry.clsid().hyphenated());
    }
}

fn print_value(row: u16, col: u16, value: &CellValue) {
    match value {
        CellValue::Text(text) => {
            println!("  R{}C{} {:?}", row + 1, col + 1, text)
        }
        other => println!("  R{}C{} {}", row + 1, col + 1, other),
    }
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Ls { long, path } => {
            let comp =
                CompoundFile::open(std::fs::read(path).unwrap()).unwrap();
            for entry in comp.entries() {
                list_entry(&entry, long);
            }
            for warning in comp.warnings() {
                eprintln!("warning: {}", warning);
            }
        }
        Command::Cat { path, stream } => {
            let comp =
                CompoundFile::open(std::fs::read(path).unwrap()).unwrap();
            let data = comp.read_named_stream(&stream).unwrap();
            io::stdout().write_all(&data).unwrap();
        }
        Command::Cells { codepage, path } => {
            let book = OpenOptions::new()
                .default_codepage(codepage)
                .open(path)
                .unwrap();
            println!("{} (codepage {})", book.version(), book.codepage());
            for sheet in book.sheets() {
                println!(
                    "{} [{:?}, {:?}] {} rows x {} cols",
                    sheet.name(),
                    sheet.kind(),
                    sheet.state(),
                    sheet.grid().rows(),
                    sheet.grid().cols()
                );
                for (row, col, value) in sheet.grid().cells() {
                    print_value(row, col, value);
                }
            }
            for warning in book.warnings() {
                eprintln!("warning: {}", warning);
            }
        }
    }
}

//! huff – compress text files with static Huffman coding.
//!
//!   huff file.txt            → write file.txt.huff
//!   huff -d file.txt.huff    → write file.txt
//!   huff -c file.txt         → write the artifact to stdout
//!   huff -s file.txt         → print statistics and the code table
//!   huff -t file.txt         → print the Huffman tree
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use huffcode::compression::huffman::to_bit_string;
use huffcode::{HuffmanArtifact, HuffmanCodec, Result};

const EXTENSION: &str = "huff";

fn usage() {
    eprintln!("huff - static Huffman text compressor");
    eprintln!();
    eprintln!("Usage: huff [OPTIONS] FILE...");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -d, --decompress   Decompress a .huff file");
    eprintln!("  -c, --stdout       Write to stdout");
    eprintln!("  -f, --force        Overwrite existing output files");
    eprintln!("  -s, --stats        Print compression statistics and codes");
    eprintln!("  -t, --tree         Print the Huffman tree");
    eprintln!("  -b, --bits         Print the encoded bit string");
    eprintln!("  -h, --help         Show this help");
}

#[derive(Debug, Default)]
struct Opts {
    decompress: bool,
    to_stdout: bool,
    force: bool,
    stats: bool,
    tree: bool,
    bits: bool,
    files: Vec<String>,
}

fn parse_args() -> std::result::Result<Opts, String> {
    let mut opts = Opts::default();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-d" | "--decompress" => opts.decompress = true,
            "-c" | "--stdout" => opts.to_stdout = true,
            "-f" | "--force" => opts.force = true,
            "-s" | "--stats" => opts.stats = true,
            "-t" | "--tree" => opts.tree = true,
            "-b" | "--bits" => opts.bits = true,
            "-h" | "--help" => {
                usage();
                std::process::exit(0);
            }
            s if s.starts_with('-') && !s.starts_with("--") && s.len() > 2 => {
                for ch in s[1..].chars() {
                    match ch {
                        'd' => opts.decompress = true,
                        'c' => opts.to_stdout = true,
                        'f' => opts.force = true,
                        's' => opts.stats = true,
                        't' => opts.tree = true,
                        'b' => opts.bits = true,
                        _ => return Err(format!("unknown flag '-{ch}'")),
                    }
                }
            }
            s if s.starts_with('-') => return Err(format!("unknown option '{s}'")),
            _ => opts.files.push(arg.clone()),
        }
    }
    if opts.files.is_empty() {
        return Err("no input files".to_string());
    }
    Ok(opts)
}

fn output_path(input: &str, decompress: bool) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(input);
    if !decompress {
        let mut name = path.clone().into_os_string();
        name.push(".");
        name.push(EXTENSION);
        return Ok(PathBuf::from(name));
    }
    if path.extension().is_some_and(|ext| ext == EXTENSION) {
        Ok(path.with_extension(""))
    } else {
        Err(format!("{input}: unknown suffix, expected .{EXTENSION}"))
    }
}

fn write_output(opts: &Opts, input: &str, data: &[u8]) -> Result<()> {
    if opts.to_stdout {
        io::stdout().write_all(data)?;
        return Ok(());
    }
    let out = output_path(input, opts.decompress).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;
    if out.exists() && !opts.force {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists, use -f to overwrite", out.display()),
        )
        .into());
    }
    fs::write(&out, data)?;
    Ok(())
}

fn compress_file(opts: &Opts, input: &str) -> Result<()> {
    let text = fs::read_to_string(input)?;
    let mut codec = HuffmanCodec::new();
    let bits = codec.encode(&text)?;

    if opts.bits {
        eprintln!("{}", to_bit_string(&bits));
    }
    if opts.tree {
        if let Some(tree) = codec.tree() {
            eprint!("{tree}");
        }
    }
    if opts.stats {
        eprintln!("{input}:");
        eprintln!("{}", codec.statistics());
        if let Some(codes) = codec.code_table() {
            for (symbol, code) in codes.by_code_length() {
                eprintln!("  {:>8}  {}", symbol.to_string(), code);
            }
        }
    }

    let artifact = codec.to_artifact()?;
    write_output(opts, input, &artifact.to_bytes()?)
}

fn decompress_file(opts: &Opts, input: &str) -> Result<()> {
    let data = fs::read(input)?;
    let artifact = HuffmanArtifact::from_bytes(&data)?;
    let text = artifact.decode()?;
    if opts.stats {
        eprintln!(
            "{input}: {} codes, {} payload bits",
            artifact.code_table().len(),
            artifact.bit_len()
        );
    }
    write_output(opts, input, text.as_bytes())
}

fn main() -> ExitCode {
    let opts = match parse_args() {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("huff: {msg}");
            usage();
            return ExitCode::FAILURE;
        }
    };

    let mut status = ExitCode::SUCCESS;
    for input in &opts.files {
        let result = if opts.decompress {
            decompress_file(&opts, input)
        } else {
            compress_file(&opts, input)
        };
        if let Err(e) = result {
            eprintln!("huff: {input}: {e}");
            status = ExitCode::FAILURE;
        }
    }
    status
}

use oscript_lang::toolchain::scanner::{
    CoreScanner, CoreSymbol, SourceCursor, SymbolId, SymbolSet, UdlScanner, UdlSymbol,
};
use oscript_lang::toolchain::source::SourceBuffer;

const HELP: &str = "\
    oslex - ObjectScript external scanner driver

    Runs one context-sensitive scan from the start of a file, as the host grammar would at a
    parse position where the given symbols are acceptable. Useful for debugging grammar and
    scanner interactions without a host parser in the loop.

    USAGE:
        oslex [--udl] [--quiet] --symbols LIST FILENAME

    OPTIONS:
        --symbols LIST      Comma-separated symbol names the scan may resolve to, for example
                            'tag' or 'argumentless_command_end,single_space_before_argument'.
        --udl               Use the UDL scanner (adds 'method_body_content') instead of the
                            core scanner.
        --quiet             If present, all non-error output is suppressed.

    ARGS:
        FILENAME            The path to the file to scan.
";

#[derive(Debug, Eq, PartialEq)]
struct OslexArgs {
    udl: bool,
    quiet: bool,
    symbols: String,
    source_file: std::path::PathBuf,
}

fn main() {
    let args = match parse_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            std::process::exit(1);
        }
    };

    let mut valid = SymbolSet::new();
    for name in args.symbols.split(',') {
        match symbol_id(name.trim(), args.udl) {
            Some(id) => valid.insert(id),
            None => {
                eprintln!("Error: unknown symbol name '{}'.", name.trim());
                std::process::exit(1);
            }
        }
    }

    let source = SourceBuffer::new_from_file(&args.source_file);
    if source.is_err() {
        eprintln!(
            "Error opening source file {}: {}",
            args.source_file.display(),
            source.err().unwrap()
        );
        std::process::exit(1);
    }
    let source = source.unwrap();
    let mut cursor = SourceCursor::new(&source);

    let matched = if args.udl {
        UdlScanner::new().scan(&mut cursor, &valid)
    } else {
        CoreScanner::new().scan(&mut cursor, &valid)
    };

    if !args.quiet {
        match cursor.result() {
            Some(id) => println!(
                "{}: {} {:?} ({} bytes consumed)",
                if matched { "match" } else { "no match" },
                symbol_name(id, args.udl),
                cursor.token_text(),
                cursor.consumed_bytes()
            ),
            None => println!("no match ({} bytes consumed)", cursor.consumed_bytes()),
        }
    }

    if !matched {
        std::process::exit(1);
    }
}

fn symbol_id(name: &str, udl: bool) -> Option<SymbolId> {
    if let Some(symbol) = CoreSymbol::from_name(name) {
        return Some(symbol.id());
    }
    if udl {
        return UdlSymbol::from_name(name).map(UdlSymbol::id);
    }
    None
}

fn symbol_name(id: SymbolId, udl: bool) -> &'static str {
    if let Some(symbol) = CoreSymbol::from_id(id) {
        return symbol.name();
    }
    if udl && id == UdlSymbol::MethodBodyContent.id() {
        return UdlSymbol::MethodBodyContent.name();
    }
    "unknown"
}

fn parse_args() -> Result<OslexArgs, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = OslexArgs {
        udl: pargs.contains("--udl"),
        quiet: pargs.contains("--quiet"),
        symbols: pargs.value_from_str("--symbols")?,
        source_file: pargs.free_from_str()?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        eprintln!("Error: unused arguments left: {:?}.", remaining);
        std::process::exit(1);
    }
    Ok(args)
}
